use crate::adapter::schema::{NativeValue, ScalarKind};
use crate::adapter::value::{Number, TaggedValue, ValueType};

/// Behavior when an integer does not fit its native width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Narrowing {
	/// Keep the low bits, like a wrapping cast.
	#[default]
	Truncate,
	/// Out-of-range values fail coercion.
	Checked,
}

/// Rejected coercion, carrying the violated expectation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mismatch {
	/// Expectation text, e.g. `must be integer`.
	pub expected: &'static str,
}

const MUST_BE_BOOL: Mismatch = Mismatch { expected: "must be bool" };
const MUST_BE_STRING: Mismatch = Mismatch { expected: "must be string" };
const MUST_BE_INTEGER: Mismatch = Mismatch { expected: "must be integer" };
const MUST_BE_NUMBER: Mismatch = Mismatch { expected: "must be number" };
const MUST_BE_FINITE: Mismatch = Mismatch { expected: "must be finite" };
const OUT_OF_RANGE_INT32: Mismatch = Mismatch {
	expected: "out of range for int32",
};
const OUT_OF_RANGE_INT64: Mismatch = Mismatch {
	expected: "out of range for int64",
};

/// Convert a non-null tagged value into the native payload for `kind`.
pub fn to_native(kind: ScalarKind, value: &TaggedValue, narrowing: Narrowing) -> Result<NativeValue, Mismatch> {
	match kind {
		ScalarKind::Bool => match value {
			TaggedValue::Bool(inner) => Ok(NativeValue::Bool(*inner)),
			_ => Err(MUST_BE_BOOL),
		},
		ScalarKind::String => match value {
			TaggedValue::String(inner) => Ok(NativeValue::String(inner.clone())),
			_ => Err(MUST_BE_STRING),
		},
		ScalarKind::Int64 => integer(value, narrowing).map(NativeValue::Int64),
		ScalarKind::Int32 => {
			let wide = integer(value, narrowing).map_err(|err| if err == OUT_OF_RANGE_INT64 { OUT_OF_RANGE_INT32 } else { err })?;
			match narrowing {
				Narrowing::Truncate => Ok(NativeValue::Int32(wide as i32)),
				Narrowing::Checked => i32::try_from(wide).map(NativeValue::Int32).map_err(|_| OUT_OF_RANGE_INT32),
			}
		}
		ScalarKind::Float64 => float(value).map(NativeValue::Float64),
		ScalarKind::Float32 => float(value).map(|wide| NativeValue::Float32(wide as f32)),
	}
}

/// Convert a native payload into a tagged value; `None` yields the kind's typed null.
///
/// Integers and floats are normalized to [`TaggedValue::Number`].
pub fn from_native(kind: ScalarKind, value: Option<&NativeValue>) -> Result<TaggedValue, Mismatch> {
	let Some(value) = value else {
		return Ok(TaggedValue::Null(element_type(kind)));
	};

	Ok(match value {
		NativeValue::Bool(inner) => TaggedValue::Bool(*inner),
		NativeValue::String(inner) => TaggedValue::String(inner.clone()),
		NativeValue::Int32(inner) => TaggedValue::Number(Number::from(*inner)),
		NativeValue::Int64(inner) => TaggedValue::Number(Number::from(*inner)),
		NativeValue::Float32(inner) => float_number(f64::from(*inner))?,
		NativeValue::Float64(inner) => float_number(*inner)?,
	})
}

/// Tagged type a native kind extracts to.
pub fn element_type(kind: ScalarKind) -> ValueType {
	match kind {
		ScalarKind::Bool => ValueType::Bool,
		ScalarKind::String => ValueType::String,
		ScalarKind::Int32 | ScalarKind::Int64 | ScalarKind::Float32 | ScalarKind::Float64 => ValueType::Number,
	}
}

fn integer(value: &TaggedValue, narrowing: Narrowing) -> Result<i64, Mismatch> {
	match value {
		TaggedValue::Int64(inner) => Ok(*inner),
		TaggedValue::Number(number) => integral(number, narrowing),
		_ => Err(MUST_BE_INTEGER),
	}
}

/// Integer value of a decimal, decided on its text so no precision is lost.
///
/// Values outside `i64` keep their low 64 bits under [`Narrowing::Truncate`].
fn integral(number: &Number, narrowing: Narrowing) -> Result<i64, Mismatch> {
	let text = number.to_string();
	let (negative, unsigned) = match text.strip_prefix('-') {
		Some(rest) => (true, rest),
		None => (false, text.as_str()),
	};
	let (mantissa, exponent) = match unsigned.split_once(['e', 'E']) {
		Some((mantissa, exponent)) => (mantissa, parse_exponent(exponent)),
		None => (unsigned, 0),
	};
	let (whole, fraction) = mantissa.split_once('.').unwrap_or((mantissa, ""));
	if whole.is_empty() || !whole.bytes().chain(fraction.bytes()).all(|byte| byte.is_ascii_digit()) {
		return Err(MUST_BE_INTEGER);
	}

	let digits: Vec<u8> = whole.bytes().chain(fraction.bytes()).map(|byte| byte - b'0').collect();
	let scale = exponent.saturating_sub(i64::try_from(fraction.len()).unwrap_or(i64::MAX));
	let kept = if scale < 0 {
		let dropped = usize::try_from(scale.unsigned_abs()).unwrap_or(usize::MAX).min(digits.len());
		let (kept, dropped) = digits.split_at(digits.len() - dropped);
		if dropped.iter().any(|&digit| digit != 0) {
			return Err(MUST_BE_INTEGER);
		}
		kept
	} else {
		&digits[..]
	};

	let mut wrapped: u64 = 0;
	let mut exact: Option<u64> = Some(0);
	for &digit in kept {
		wrapped = wrapped.wrapping_mul(10).wrapping_add(u64::from(digit));
		exact = exact.and_then(|magnitude| magnitude.checked_mul(10)?.checked_add(u64::from(digit)));
	}
	// 10^64 is a multiple of 2^64, so further zeros leave the low bits at 0.
	for _ in 0..scale.clamp(0, 64) {
		wrapped = wrapped.wrapping_mul(10);
		exact = exact.and_then(|magnitude| magnitude.checked_mul(10));
	}

	let exact = exact.and_then(|magnitude| {
		let magnitude = i128::from(magnitude);
		i64::try_from(if negative { -magnitude } else { magnitude }).ok()
	});
	match (exact, narrowing) {
		(Some(value), _) => Ok(value),
		(None, Narrowing::Checked) => Err(OUT_OF_RANGE_INT64),
		(None, Narrowing::Truncate) => {
			let bits = if negative { wrapped.wrapping_neg() } else { wrapped };
			Ok(bits as i64)
		}
	}
}

fn parse_exponent(text: &str) -> i64 {
	text.parse().unwrap_or(if text.starts_with('-') { i64::MIN } else { i64::MAX })
}

fn float(value: &TaggedValue) -> Result<f64, Mismatch> {
	match value {
		TaggedValue::Float64(inner) => Ok(*inner),
		TaggedValue::Number(number) => number.as_f64().ok_or(MUST_BE_NUMBER),
		_ => Err(MUST_BE_NUMBER),
	}
}

fn float_number(value: f64) -> Result<TaggedValue, Mismatch> {
	Number::from_f64(value).map(TaggedValue::Number).ok_or(MUST_BE_FINITE)
}
