//! Arrow value to text conversion.

use arrow::array::{
    Array, BinaryArray, BooleanArray, Float32Array, Float64Array, Int16Array, Int32Array,
    Int64Array, Int8Array, LargeBinaryArray, LargeStringArray, StringArray, UInt16Array,
    UInt32Array, UInt64Array, UInt8Array,
};
use arrow::datatypes::DataType;
use arrow::util::display::{ArrayFormatter, FormatOptions};

use crate::error::Result;

/// Format an Arrow array value at the given row index as display text.
///
/// Returns `None` for nulls and out-of-range rows; absent content is resolved
/// later by the missing-value policy. Primitive and string types take a
/// direct path; everything else (dates, timestamps, decimals, dictionaries,
/// nested types) goes through Arrow's display formatter.
///
/// # Errors
///
/// Returns an Arrow error if no formatter exists for the array's type.
pub fn format_array_value(array: &dyn Array, row: usize) -> Result<Option<String>> {
    if row >= array.len() || array.is_null(row) {
        return Ok(None);
    }

    let formatted = match array.data_type() {
        DataType::Utf8 => downcast_value::<StringArray, _>(array, |a| a.value(row).to_string()),
        DataType::LargeUtf8 => {
            downcast_value::<LargeStringArray, _>(array, |a| a.value(row).to_string())
        }

        DataType::Int8 => downcast_value::<Int8Array, _>(array, |a| a.value(row).to_string()),
        DataType::Int16 => downcast_value::<Int16Array, _>(array, |a| a.value(row).to_string()),
        DataType::Int32 => downcast_value::<Int32Array, _>(array, |a| a.value(row).to_string()),
        DataType::Int64 => downcast_value::<Int64Array, _>(array, |a| a.value(row).to_string()),
        DataType::UInt8 => downcast_value::<UInt8Array, _>(array, |a| a.value(row).to_string()),
        DataType::UInt16 => downcast_value::<UInt16Array, _>(array, |a| a.value(row).to_string()),
        DataType::UInt32 => downcast_value::<UInt32Array, _>(array, |a| a.value(row).to_string()),
        DataType::UInt64 => downcast_value::<UInt64Array, _>(array, |a| a.value(row).to_string()),

        DataType::Float32 => {
            downcast_value::<Float32Array, _>(array, |a| a.value(row).to_string())
        }
        DataType::Float64 => {
            downcast_value::<Float64Array, _>(array, |a| a.value(row).to_string())
        }

        DataType::Boolean => {
            downcast_value::<BooleanArray, _>(array, |a| a.value(row).to_string())
        }

        DataType::Binary => {
            downcast_value::<BinaryArray, _>(array, |a| format_bytes_preview(a.value(row)))
        }
        DataType::LargeBinary => {
            downcast_value::<LargeBinaryArray, _>(array, |a| format_bytes_preview(a.value(row)))
        }

        DataType::Null => None,

        _ => {
            let options = FormatOptions::default();
            let formatter = ArrayFormatter::try_new(array, &options)?;
            Some(formatter.value(row).to_string())
        }
    };

    Ok(formatted)
}

fn downcast_value<A: 'static, F: FnOnce(&A) -> String>(
    array: &dyn Array,
    f: F,
) -> Option<String> {
    array.as_any().downcast_ref::<A>().map(f)
}

/// Format binary data as hex preview
fn format_bytes_preview(bytes: &[u8]) -> String {
    if bytes.len() <= 8 {
        format!("0x{}", hex::encode(bytes))
    } else {
        format!("0x{}... ({} bytes)", hex::encode(&bytes[..8]), bytes.len())
    }
}

/// Truncate a string to fit within a maximum display width
///
/// Width is measured with `unicode-width`, so wide glyphs count double.
/// Adds `..` if truncation occurs.
pub fn truncate_string(s: &str, max_width: usize) -> String {
    use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

    if UnicodeWidthStr::width(s) <= max_width {
        return s.to_string();
    }

    let (budget, suffix) = if max_width < 3 {
        (max_width, "")
    } else {
        (max_width - 2, "..")
    };

    let mut result = String::new();
    let mut used = 0;
    for ch in s.chars() {
        let w = UnicodeWidthChar::width(ch).unwrap_or(0);
        if used + w > budget {
            break;
        }
        used += w;
        result.push(ch);
    }
    result.push_str(suffix);
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use arrow::array::{ArrayRef, Date32Array, DictionaryArray, NullArray};
    use arrow::datatypes::Int8Type;
    use std::sync::Arc;

    #[test]
    fn f_format_utf8_string() {
        let array: ArrayRef = Arc::new(StringArray::from(vec![Some("hello"), Some("world")]));
        let result = format_array_value(array.as_ref(), 0).unwrap();
        assert_eq!(result, Some("hello".to_string()));
    }

    #[test]
    fn f_format_null_is_absent() {
        let array: ArrayRef = Arc::new(StringArray::from(vec![None, Some("world")]));
        let result = format_array_value(array.as_ref(), 0).unwrap();
        assert_eq!(result, None, "FALSIFIED: null must be absent content");
    }

    #[test]
    fn f_format_int32() {
        let array: ArrayRef = Arc::new(Int32Array::from(vec![Some(42), Some(-100)]));
        assert_eq!(
            format_array_value(array.as_ref(), 0).unwrap(),
            Some("42".to_string())
        );
        assert_eq!(
            format_array_value(array.as_ref(), 1).unwrap(),
            Some("-100".to_string())
        );
    }

    #[test]
    fn f_format_float64_keeps_precision() {
        let array: ArrayRef = Arc::new(Float64Array::from(vec![1.5, 0.125]));
        assert_eq!(
            format_array_value(array.as_ref(), 1).unwrap(),
            Some("0.125".to_string())
        );
    }

    #[test]
    fn f_format_boolean() {
        let array: ArrayRef = Arc::new(BooleanArray::from(vec![true, false]));
        assert_eq!(
            format_array_value(array.as_ref(), 1).unwrap(),
            Some("false".to_string())
        );
    }

    #[test]
    fn f_format_date_via_display_formatter() {
        let array: ArrayRef = Arc::new(Date32Array::from(vec![0]));
        assert_eq!(
            format_array_value(array.as_ref(), 0).unwrap(),
            Some("1970-01-01".to_string())
        );
    }

    #[test]
    fn f_format_dictionary_via_display_formatter() {
        let array: DictionaryArray<Int8Type> = vec!["a", "b", "a"].into_iter().collect();
        let array: ArrayRef = Arc::new(array);
        assert_eq!(
            format_array_value(array.as_ref(), 2).unwrap(),
            Some("a".to_string())
        );
    }

    #[test]
    fn f_format_null_array() {
        let array: ArrayRef = Arc::new(NullArray::new(2));
        assert_eq!(format_array_value(array.as_ref(), 0).unwrap(), None);
    }

    #[test]
    fn f_format_out_of_bounds() {
        let array: ArrayRef = Arc::new(StringArray::from(vec!["hello"]));
        assert_eq!(format_array_value(array.as_ref(), 10).unwrap(), None);
    }

    #[test]
    fn f_format_binary_preview() {
        let array: ArrayRef = Arc::new(BinaryArray::from(vec![&[0xde_u8, 0xad][..]]));
        assert_eq!(
            format_array_value(array.as_ref(), 0).unwrap(),
            Some("0xdead".to_string())
        );
    }

    #[test]
    fn f_format_bytes_preview_long() {
        let bytes = vec![0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08, 0x09, 0x0a];
        let result = format_bytes_preview(&bytes);
        assert_eq!(result, "0x0102030405060708... (10 bytes)");
    }

    #[test]
    fn f_truncate_string_short() {
        assert_eq!(truncate_string("hello", 10), "hello");
        assert_eq!(truncate_string("hello", 5), "hello");
    }

    #[test]
    fn f_truncate_string_long() {
        let result = truncate_string("hello world this is a long string", 10);
        assert_eq!(result, "hello wo..");
    }

    #[test]
    fn f_truncate_string_very_short_max() {
        assert_eq!(truncate_string("hello", 2), "he");
    }

    #[test]
    fn f_truncate_string_wide_glyphs() {
        // Each glyph is two columns wide.
        let result = truncate_string("日本語です", 6);
        assert_eq!(result, "日本..");
    }
}
