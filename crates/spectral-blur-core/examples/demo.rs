//! Spectral blur demo - blur a synthetic image and print a few pixels
//!
//! Run with: cargo run -p spectral-blur-core --example demo

use spectral_blur_core::fft::padded_length;
use spectral_blur_core::{blur, pack_rgb, unpack_rgb, BlurOptions, PixelSurface, RgbImage};

fn main() {
    println!("=== Spectral Blur Demo ===\n");

    // A dark 16x8 image with a white square in the middle.
    let width = 16;
    let height = 8;
    let mut img = RgbImage::new(width, height);
    for y in 3..5 {
        for x in 7..9 {
            img.set_pixel(x, y, pack_rgb(255, 255, 255));
        }
    }
    println!("1. Created a {}x{} image with a 2x2 white square", width, height);

    println!(
        "2. Padded line lengths: horizontal {}, vertical {}",
        padded_length(width as usize),
        padded_length(height as usize)
    );

    let options = BlurOptions::new().with_radius(1.5);
    let blurred = blur(&img, &options).expect("Failed to blur");
    println!("3. Blurred with radius {}\n", options.radius());

    println!("   Row 3 after blur (red channel):");
    let row: Vec<String> = (0..width)
        .map(|x| format!("{:3}", unpack_rgb(blurred.get_pixel(x, 3))[0]))
        .collect();
    println!("   {}", row.join(" "));

    println!("\n=== Demo Complete ===");
}
