/// Metadata key holding a field's wire name.
pub const NAME_KEY: &str = "name";

/// Look up `key` in comma-separated `key=value` field metadata.
///
/// Pairs without `=` are flags and never match. The first matching pair wins.
pub fn lookup<'a>(meta: &'a str, key: &str) -> Option<&'a str> {
	meta.split(',').find_map(|pair| {
		let (k, v) = pair.trim().split_once('=')?;
		(k.trim() == key).then(|| v.trim())
	})
}

/// Resolve the wire name from optional field metadata.
///
/// An empty `name=` is treated as untagged.
pub fn wire_name(meta: Option<&str>) -> Option<&str> {
	meta.and_then(|meta| lookup(meta, NAME_KEY)).filter(|name| !name.is_empty())
}
