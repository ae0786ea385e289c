use crate::core::units::{MetalUnit, convert_weight};

pub fn describe(weight: f64, from: MetalUnit, to: MetalUnit) -> String {
    let converted = convert_weight(weight, from, to);
    format!("{weight:.4} {from} = {converted:.4} {to}")
}

/// Prints `weight` expressed in another unit.
pub fn run(weight: f64, from: MetalUnit, to: MetalUnit) {
    println!("{}", describe(weight, from, to));
}
