//! Benchmark for ABI encoding/decoding using transfer records.
//!
//! Usage: `bench-transfers [transfers.json] [constraints.json]`
//!
//! Without a data file a deterministic synthetic batch is generated.

use std::fs;
use std::time::Instant;

use abi_codec::{
    Address, BinaryCodec, Constraints, FieldDefinition, List, OptionValue, PrimitiveKind, Reader,
    Struct, StructType, Type, TypedValue, Writer,
};
use serde::Deserialize;

const SYNTHETIC_COUNT: usize = 50_000;

// =============================================================================
// JSON DATA STRUCTURES
// =============================================================================

#[derive(Debug, Deserialize)]
struct Transfer {
    sender: String,
    receiver: String,
    nonce: u64,
    gas_limit: u32,
    value: u64,
    urgent: bool,
    #[serde(default)]
    memo_id: Option<u16>,
}

// =============================================================================
// SCHEMA
// =============================================================================

fn transfer_type() -> StructType {
    StructType::new(
        "Transfer",
        vec![
            FieldDefinition::new("sender", PrimitiveKind::Address.into()),
            FieldDefinition::new("receiver", PrimitiveKind::Address.into()),
            FieldDefinition::new("nonce", PrimitiveKind::U64.into()),
            FieldDefinition::new("gas_limit", PrimitiveKind::U32.into()),
            FieldDefinition::new("value", PrimitiveKind::U64.into()),
            FieldDefinition::new("urgent", PrimitiveKind::Bool.into()),
            FieldDefinition::new("memo_id", Type::option(PrimitiveKind::U16.into())),
        ],
    )
    .expect("Transfer field names are unique")
}

fn parse_address(s: &str) -> Address {
    let s = s.trim_start_matches("0x");
    let mut out = [0u8; 32];
    for (i, byte) in out.iter_mut().enumerate() {
        if let Some(pair) = s.get(i * 2..i * 2 + 2) {
            *byte = u8::from_str_radix(pair, 16).unwrap_or(0);
        }
    }
    Address(out)
}

fn synthetic_address(seed: u64) -> Address {
    let mut out = [0u8; 32];
    for (i, chunk) in out.chunks_mut(8).enumerate() {
        chunk.copy_from_slice(&(seed.wrapping_mul(0x9E37_79B9_7F4A_7C15) ^ i as u64).to_be_bytes());
    }
    Address(out)
}

fn synthetic_transfers(count: usize) -> Vec<Transfer> {
    (0..count as u64)
        .map(|i| Transfer {
            sender: hex_string(&synthetic_address(i).0),
            receiver: hex_string(&synthetic_address(i + 1).0),
            nonce: i,
            gas_limit: 50_000 + (i % 1000) as u32,
            value: i * 1_000_000_000,
            urgent: i % 7 == 0,
            memo_id: if i % 3 == 0 { Some((i % 65_536) as u16) } else { None },
        })
        .collect()
}

fn hex_string(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}

fn to_value(schema: &StructType, t: &Transfer) -> TypedValue {
    let memo = match t.memo_id {
        Some(id) => OptionValue::some(id.into()),
        None => OptionValue::none(PrimitiveKind::U16.into()),
    };
    Struct::new(
        schema.clone(),
        vec![
            parse_address(&t.sender).into(),
            parse_address(&t.receiver).into(),
            t.nonce.into(),
            t.gas_limit.into(),
            t.value.into(),
            t.urgent.into(),
            memo.into(),
        ],
    )
    .expect("Transfer values match schema")
    .into()
}

fn throughput(bytes: usize, secs: f64) -> f64 {
    (bytes as f64 / 1_000_000.0) / secs
}

fn main() {
    let mut args = std::env::args().skip(1);
    let data_path = args.next();
    let constraints_path = args.next();

    let transfers: Vec<Transfer> = match &data_path {
        Some(path) => {
            println!("Loading transfers from: {}", path);
            let json = fs::read_to_string(path).expect("Failed to read transfers file");
            serde_json::from_str(&json).expect("Failed to parse JSON")
        }
        None => {
            println!("Generating {} synthetic transfers", SYNTHETIC_COUNT);
            synthetic_transfers(SYNTHETIC_COUNT)
        }
    };

    let constraints: Constraints = match &constraints_path {
        Some(path) => {
            let json = fs::read_to_string(path).expect("Failed to read constraints file");
            serde_json::from_str(&json).expect("Failed to parse constraints")
        }
        None => Constraints::default(),
    };
    println!("Constraints: {:?}", constraints);

    let schema = transfer_type();
    let ty = Type::Struct(schema.clone());
    println!("Record type: {} ({:?})", ty, ty.cardinality());

    let convert_start = Instant::now();
    let values: Vec<TypedValue> = transfers.iter().map(|t| to_value(&schema, t)).collect();
    println!("Converted {} records in {:?}", values.len(), convert_start.elapsed());

    let codec = BinaryCodec::with_constraints(constraints);

    // Benchmark per-record top-level encoding
    let encode_start = Instant::now();
    let encoded: Vec<Vec<u8>> = values
        .iter()
        .map(|v| codec.encode_top_level(v).expect("Failed to encode"))
        .collect();
    let encode_time = encode_start.elapsed();
    let total_bytes: usize = encoded.iter().map(Vec::len).sum();

    println!("\nTop-level encode: {} bytes in {:?}", total_bytes, encode_time);
    println!("  Throughput: {:.2} MB/s", throughput(total_bytes, encode_time.as_secs_f64()));

    // Benchmark per-record decoding
    let decode_start = Instant::now();
    let decoded: Vec<TypedValue> = encoded
        .iter()
        .map(|bytes| codec.decode_top_level(bytes, &ty).expect("Failed to decode"))
        .collect();
    let decode_time = decode_start.elapsed();

    println!("\nTop-level decode: {} records in {:?}", decoded.len(), decode_time);
    println!("  Throughput: {:.2} MB/s", throughput(total_bytes, decode_time.as_secs_f64()));

    if decoded == values {
        println!("  Round-trip: OK");
    } else {
        println!("  Round-trip: MISMATCH");
    }

    // Batch as a single count-prefixed list; needs roomier constraints
    let batch_codec = BinaryCodec::with_constraints(
        Constraints::new()
            .with_max_buffer_length(total_bytes + values.len() + 4)
            .with_max_list_length(values.len()),
    );
    let batch = List::new(ty.clone(), values).expect("Batch items match schema");

    let batch_start = Instant::now();
    let mut writer = Writer::with_capacity(total_bytes + 4);
    batch_codec
        .write_nested(&mut writer, &batch.into())
        .expect("Failed to encode batch");
    let batch_time = batch_start.elapsed();
    println!("\nBatch encode: {} bytes in {:?}", writer.len(), batch_time);

    let batch_start = Instant::now();
    let mut reader = Reader::new(writer.as_bytes());
    let decoded_batch = batch_codec
        .read_nested(&mut reader, &Type::list(ty))
        .expect("Failed to decode batch");
    let batch_time = batch_start.elapsed();
    println!(
        "Batch decode: {} records in {:?} ({} bytes unread)",
        decoded_batch.as_list().map(List::len).unwrap_or(0),
        batch_time,
        reader.remaining_len()
    );
}
