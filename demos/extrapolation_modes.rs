extern crate interp_spline;

use interp_spline::{Extrapolation, Fitter};

fn main() {
    let x = vec![1.0, 2.0, 3.0, 4.0, 5.0];
    let y = vec![1.0, 0.0, -2.0, 1.0, 1.0];

    let spline = Fitter::new(3).fit(&x, &y).unwrap().into_spline();

    let x_min = 0.0;
    let x_max = 6.0;
    let number_of_steps = 60;
    let step = (x_max - x_min) / number_of_steps as f64;

    println!("x;extrapolate;zeros;const");
    for i in 0..=number_of_steps {
        let point = x_min + step * i as f64;
        let extended = spline
            .evaluate_with(&[point], 0, Some(Extrapolation::Extrapolate))
            .unwrap();
        let zeroed = spline
            .evaluate_with(&[point], 0, Some(Extrapolation::Zeros))
            .unwrap();
        let clamped = spline
            .evaluate_with(&[point], 0, Some(Extrapolation::Const))
            .unwrap();
        println!(
            "{:.2};{:.2};{:.2};{:.2}",
            point, extended[0], zeroed[0], clamped[0]
        );
    }
}
