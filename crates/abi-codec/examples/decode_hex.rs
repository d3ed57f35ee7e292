//! Simple decoder to inspect hex-encoded ABI payloads.
//!
//! Usage: `decode_hex <type-expr> <hex> [--nested]`
//!
//! ```text
//! cargo run --example decode_hex -- "Option<u16>" 010005
//! cargo run --example decode_hex -- "Pair { a: u8, b: List<bool> }" 07000000020100 --nested
//! ```

use abi_codec::{parse_type, BinaryCodec, TypedValue};

fn parse_hex(s: &str) -> Vec<u8> {
    let s = s.trim().trim_start_matches("0x");
    assert!(s.len() % 2 == 0, "hex input must have an even number of digits");
    (0..s.len())
        .step_by(2)
        .map(|i| u8::from_str_radix(&s[i..i + 2], 16).expect("Invalid hex digit"))
        .collect()
}

fn describe(value: &TypedValue, indent: usize) {
    let pad = "  ".repeat(indent);
    match value {
        TypedValue::Struct(s) => {
            println!("{}{} {{", pad, s.struct_type().name());
            for (definition, field) in s.struct_type().fields().iter().zip(s.fields()) {
                println!("{}  {}: {}", pad, definition.name, definition.field_type);
                describe(field, indent + 2);
            }
            println!("{}}}", pad);
        }
        TypedValue::List(l) => {
            println!("{}List<{}> ({} items)", pad, l.element_type(), l.len());
            for item in l.items().iter().take(10) {
                describe(item, indent + 1);
            }
            if l.len() > 10 {
                println!("{}  ... and {} more items", pad, l.len() - 10);
            }
        }
        other => println!("{}{}", pad, other),
    }
}

fn main() {
    let mut args = std::env::args().skip(1);
    let expr = args.next().unwrap_or_else(|| "u32".to_string());
    let hex = args.next().unwrap_or_default();
    let nested = args.any(|a| a == "--nested");

    let ty = parse_type(&expr).expect("Failed to parse type expression");
    let data = parse_hex(&hex);

    println!("Type: {}", ty);
    println!("Cardinality: {:?}", ty.cardinality());
    println!("Input: {} bytes ({})", data.len(), if nested { "nested" } else { "top-level" });

    let codec = BinaryCodec::new();
    if nested {
        let (value, consumed) = codec.decode_nested(&data, &ty).expect("Failed to decode");
        println!("Consumed: {} bytes", consumed);
        if consumed < data.len() {
            println!("Unread: {} bytes", data.len() - consumed);
        }
        println!("\n=== Value ===");
        describe(&value, 0);
    } else {
        let value = codec.decode_top_level(&data, &ty).expect("Failed to decode");
        println!("\n=== Value ===");
        describe(&value, 0);
    }
}
