use std::process::ExitCode;

use ordfloat::{decode, encode, BigFloat, RadixConverter};

/// Decode each command-line argument and print its value; with no
/// arguments, run a short demonstration of the encoding.
fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.is_empty() {
        demo();
        return ExitCode::SUCCESS;
    }

    let converter = RadixConverter::default();
    let mut status = ExitCode::SUCCESS;
    for arg in &args {
        match decode(arg) {
            Ok(value) => {
                if value.is_finite() {
                    // A finite value also gets its radix-16 scientific
                    // form, which is easier to read than the raw
                    // significand.
                    match converter.to_radix(&value) {
                        Ok(digits) => println!("{arg} = {value} = {digits}"),
                        Err(_) => println!("{arg} = {value}"),
                    }
                } else {
                    println!("{arg} = {value}");
                }
            }
            Err(e) => {
                eprintln!("{e}");
                status = ExitCode::FAILURE;
            }
        }
    }
    status
}

fn demo() {
    println!("=== ordfloat encoding demo ===\n");

    let examples = [-256.0, -1.5, -0.0, 0.0, 0.5, 1.0, 1.5, 2.0, 256.0];
    println!("Doubles and their encodings:\n");
    let mut encoded = Vec::new();
    for value in examples {
        let n = BigFloat::from(value);
        match encode(&n) {
            Ok(s) => {
                println!("  {value:>8} -> {s}");
                encoded.push((value, s));
            }
            Err(e) => println!("  {value:>8} -> error: {e}"),
        }
    }

    println!("\nVerifying lexicographic order matches numeric order:");
    for pair in encoded.windows(2) {
        let (v1, s1) = &pair[0];
        let (v2, s2) = &pair[1];
        if s1 < s2 {
            println!("  ok: {v1} < {v2} and {s1:?} < {s2:?}");
        } else {
            println!("  ORDER VIOLATION: {v1} < {v2} but {s1:?} >= {s2:?}");
        }
    }

    println!("\nSpecial values:");
    for value in [
        BigFloat::negative_infinity(),
        BigFloat::negative_zero(),
        BigFloat::zero(),
        BigFloat::infinity(),
        BigFloat::from(f64::NAN),
    ] {
        match encode(&value) {
            Ok(s) => println!("  {value:>9} -> {s}"),
            Err(e) => println!("  {value:>9} -> error: {e}"),
        }
    }

    println!("\nRound trip:");
    let value = BigFloat::from(42.195);
    if let Ok(s) = encode(&value) {
        match decode(&s) {
            Ok(back) if back == value => println!("  42.195 -> {s} -> {back} (exact)"),
            Ok(back) => println!("  42.195 -> {s} -> {back} (MISMATCH)"),
            Err(e) => println!("  decode failed: {e}"),
        }
    }

    println!("\n=== demo complete ===");
}
