extern crate interp_spline;

use interp_spline::order_sweep;

fn main() {
    let x = vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0];
    let y = vec![1.0, -1.0, 0.0, 3.0, 0.5, 1.0];
    let x_new = 2.5;

    let fits = order_sweep(&x, &y, x_new).unwrap();

    for fit in &fits {
        println!("spline order {}: {:.6}", fit.degree, fit.value);
    }

    println!("x;y1;y2;y3");
    for i in 0..fits[0].curve.len() {
        println!(
            "{:.2};{:.2};{:.2};{:.2}",
            fits[0].curve[i].0, fits[0].curve[i].1, fits[1].curve[i].1, fits[2].curve[i].1
        );
    }
}
