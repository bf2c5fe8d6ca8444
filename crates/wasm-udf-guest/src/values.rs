//! Conversions between MessagePack values and SQL argument types.

use anyhow::{anyhow, bail, Context, Result};
use rmpv::Value;

/// A SQL `DECIMAL` as an unscaled 128-bit integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decimal {
    pub precision: u8,
    pub scale: u8,
    pub value: i128,
}

pub fn decode_i64(v: &Value) -> Result<i64> {
    v.as_i64()
        .ok_or_else(|| anyhow!("Expected to find i64 value, but received {v:?} instead"))
}

pub fn decode_i32(v: &Value) -> Result<i32> {
    let n = decode_i64(v)?;
    i32::try_from(n).with_context(|| format!("Error converting i64 {n} to i32"))
}

pub fn decode_i16(v: &Value) -> Result<i16> {
    let n = decode_i64(v)?;
    i16::try_from(n).with_context(|| format!("Error converting i64 {n} to i16"))
}

pub fn decode_f64(v: &Value) -> Result<f64> {
    v.as_f64()
        .ok_or_else(|| anyhow!("Expected to find f64 value, but received {v:?} instead"))
}

/// Accepts only single-precision floats; doubles are not narrowed.
pub fn decode_f32(v: &Value) -> Result<f32> {
    match v {
        Value::F32(n) => Ok(*n),
        _ => bail!("Expected to find f32 value, but received {v:?} instead"),
    }
}

pub fn decode_str(v: &Value) -> Result<&str> {
    v.as_str()
        .ok_or_else(|| anyhow!("Expected to find str value, but received {v:?} instead"))
}

pub fn decode_bool(v: &Value) -> Result<bool> {
    v.as_bool()
        .ok_or_else(|| anyhow!("Expected to find bool value, but received {v:?} instead"))
}

/// Encode as `[precision, scale, high, low]`, where `high` and `low` are
/// the upper and lower 64-bit halves of the unscaled value.
pub fn encode_decimal(decimal: &Decimal) -> Value {
    let low = decimal.value as i64;
    let high = (decimal.value >> 64) as i64;
    Value::Array(vec![
        Value::from(decimal.precision),
        Value::from(decimal.scale),
        Value::from(high),
        Value::from(low),
    ])
}

pub fn decode_decimal(v: &Value) -> Result<Decimal> {
    let parts = v.as_array().ok_or_else(|| {
        anyhow!("Expected to find array containing decimal parts, received {v:?} instead")
    })?;
    let [precision, scale, high, low] = parts.as_slice() else {
        bail!(
            "DECIMAL array should have 4 elements, found {} instead",
            parts.len()
        );
    };

    let precision = decode_u8(precision, "precision")?;
    let scale = decode_u8(scale, "scale")?;
    let high = high.as_i64().ok_or_else(|| {
        anyhow!("Decimal value high half expected to be integer, found {high:?} instead")
    })?;
    let low = low.as_i64().ok_or_else(|| {
        anyhow!("Decimal value low half expected to be integer, found {low:?} instead")
    })?;

    // `low` carries raw bits; reinterpret before combining.
    let value = ((high as i128) << 64) | (low as u64 as i128);
    Ok(Decimal {
        precision,
        scale,
        value,
    })
}

fn decode_u8(v: &Value, what: &str) -> Result<u8> {
    let n = v
        .as_u64()
        .ok_or_else(|| anyhow!("Decimal {what} expected to be integer, found {v:?} instead"))?;
    u8::try_from(n).with_context(|| format!("Couldn't convert {what} value {n} to u8"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integers_narrow_with_range_checks() {
        assert_eq!(decode_i64(&Value::from(-7)).unwrap(), -7);
        assert_eq!(decode_i32(&Value::from(i32::MIN)).unwrap(), i32::MIN);
        assert!(decode_i32(&Value::from(i64::from(i32::MAX) + 1)).is_err());
        assert_eq!(decode_i16(&Value::from(300)).unwrap(), 300);
        assert!(decode_i16(&Value::from(40_000)).is_err());
        assert!(decode_i64(&Value::from("1")).is_err());
    }

    #[test]
    fn floats() {
        assert_eq!(decode_f64(&Value::F64(1.5)).unwrap(), 1.5);
        assert_eq!(decode_f32(&Value::F32(0.25)).unwrap(), 0.25);
        assert!(decode_f32(&Value::F64(0.25)).is_err());
    }

    #[test]
    fn strings_and_bools() {
        assert_eq!(decode_str(&Value::from("abc")).unwrap(), "abc");
        assert!(decode_str(&Value::from(1)).is_err());
        assert!(decode_bool(&Value::from(true)).unwrap());
        assert!(decode_bool(&Value::Nil).is_err());
    }

    #[test]
    fn decimal_halves() {
        let d = Decimal {
            precision: 38,
            scale: 4,
            value: -(1i128 << 70) - 12345,
        };
        let encoded = encode_decimal(&d);
        assert_eq!(encoded.as_array().unwrap().len(), 4);
        assert_eq!(decode_decimal(&encoded).unwrap(), d);

        let small = Decimal {
            precision: 10,
            scale: 2,
            value: 12345,
        };
        assert_eq!(
            encode_decimal(&small),
            Value::Array(vec![
                Value::from(10u8),
                Value::from(2u8),
                Value::from(0i64),
                Value::from(12345i64)
            ])
        );
    }

    #[test]
    fn decimal_low_half_keeps_high_bit() {
        let d = Decimal {
            precision: 20,
            scale: 0,
            value: i128::from(u64::MAX),
        };
        assert_eq!(decode_decimal(&encode_decimal(&d)).unwrap(), d);
    }

    #[test]
    fn malformed_decimals() {
        assert!(decode_decimal(&Value::from(1)).is_err());
        let three = Value::Array(vec![Value::from(1), Value::from(2), Value::from(3)]);
        assert!(decode_decimal(&three)
            .unwrap_err()
            .to_string()
            .contains("4 elements"));
        let big_scale = Value::Array(vec![
            Value::from(1),
            Value::from(300),
            Value::from(0),
            Value::from(0),
        ]);
        assert!(decode_decimal(&big_scale).is_err());
    }
}
