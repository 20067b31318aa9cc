use std::iter::Extend;

use crate::value::{Dictionary, Value};

pub fn encode(val: &Value, bytes: &mut Vec<u8>) {
    match val {
        Value::Int(n) => encode_int(*n, bytes),
        Value::Bytes(n) => encode_bytes(n, bytes),
        Value::List(n) => encode_list(n, bytes),
        Value::Dict(n) => encode_dict(n, bytes),
    }
}

fn encode_int(val: i64, bytes: &mut Vec<u8>) {
    bytes.push(crate::INT_START);

    bytes.extend(val.to_string().into_bytes());

    bytes.push(crate::BEN_END);
}

fn encode_bytes(list: &[u8], bytes: &mut Vec<u8>) {
    bytes.extend(list.len().to_string().into_bytes());

    bytes.push(crate::BYTE_LEN_END);

    bytes.extend(list.iter().copied());
}

fn encode_list(list: &[Value], bytes: &mut Vec<u8>) {
    bytes.push(crate::LIST_START);

    for i in list {
        encode(i, bytes);
    }

    bytes.push(crate::BEN_END);
}

fn encode_dict(dict: &Dictionary, bytes: &mut Vec<u8>) {
    // Keys are written in stored order, not sorted
    bytes.push(crate::DICT_START);
    for (key, value) in dict {
        encode_bytes(key, bytes);
        encode(value, bytes);
    }
    bytes.push(crate::BEN_END);
}
