//! Primitive type names across languages.
//!
//! Only the small shared core (integers, floats, strings, booleans, void) is
//! mapped, along with arrays, slices, vectors and lists of it. Anything else
//! is passed through unchanged between identical languages and otherwise left
//! for the caller to replace with the target's fallback type.

use crate::Language;

/// Language-independent primitive type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CanonicalType {
    Int,
    Float,
    Str,
    Bool,
    Void,
}

/// Where a type name appears; Rust borrows strings in parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypePosition {
    Param,
    Return,
    Local,
    Field,
}

/// Recognise a source type name (`int`, `std::string`, `&str`, `Integer`, ...).
pub fn canonical_type(ty: &str) -> Option<CanonicalType> {
    let mut ty = ty.trim();
    for prefix in ["const ", "&mut ", "&", "std::"] {
        if let Some(rest) = ty.strip_prefix(prefix) {
            ty = rest.trim_start();
        }
    }
    let ty = ty.trim_end_matches(['&', ' ']);
    let canonical = match ty {
        "int" | "long" | "short" | "Integer" | "Long" | "i8" | "i16" | "i32" | "i64" | "i128"
        | "isize" | "u8" | "u16" | "u32" | "u64" | "usize" | "int32" | "int64" | "uint"
        | "size_t" => CanonicalType::Int,
        "float" | "double" | "Double" | "Float" | "f32" | "f64" | "float32" | "float64" => {
            CanonicalType::Float
        }
        "str" | "String" | "string" => CanonicalType::Str,
        "bool" | "boolean" | "Boolean" => CanonicalType::Bool,
        "void" | "None" | "()" => CanonicalType::Void,
        _ => return None,
    };
    Some(canonical)
}

/// Spell a canonical type in `lang`. `None` means the type is omitted.
pub fn type_name(lang: Language, ty: CanonicalType, position: TypePosition) -> Option<&'static str> {
    use CanonicalType::*;
    let name = match (lang, ty) {
        (Language::JavaScript, _) => return None,
        (Language::Python, Int) => "int",
        (Language::Python, Float) => "float",
        (Language::Python, Str) => "str",
        (Language::Python, Bool) => "bool",
        (Language::Python, Void) => "None",
        (Language::Java, Int) => "int",
        (Language::Java, Float) => "double",
        (Language::Java, Str) => "String",
        (Language::Java, Bool) => "boolean",
        (Language::Java, Void) => "void",
        (Language::Cpp, Int) => "int",
        (Language::Cpp, Float) => "double",
        (Language::Cpp, Str) => "std::string",
        (Language::Cpp, Bool) => "bool",
        (Language::Cpp, Void) => "void",
        (Language::Go, Int) => "int",
        (Language::Go, Float) => "float64",
        (Language::Go, Str) => "string",
        (Language::Go, Bool) => "bool",
        (Language::Go, Void) => return None,
        (Language::Rust, Int) => "i64",
        (Language::Rust, Float) => "f64",
        (Language::Rust, Str) if position == TypePosition::Param => "&str",
        (Language::Rust, Str) => "String",
        (Language::Rust, Bool) => "bool",
        (Language::Rust, Void) => return None,
    };
    Some(name)
}

/// Element type of a sequence type: `T[]`, `[]T`, `Vec<T>`, `&[T]`,
/// `std::vector<T>`, `list[T]` or `List[T]`.
pub fn sequence_element(ty: &str) -> Option<&str> {
    let ty = ty.trim();
    let ty = ty
        .strip_prefix("const ")
        .unwrap_or(ty)
        .trim_end_matches(['&', ' ']);
    let element = if let Some(inner) = ty.strip_suffix("[]") {
        inner
    } else if let Some(inner) = ty.strip_prefix("[]") {
        inner
    } else if let Some(inner) = ty.strip_prefix("&[").and_then(|t| t.strip_suffix(']')) {
        inner
    } else if let Some(inner) = ["Vec<", "&Vec<", "std::vector<", "vector<"]
        .iter()
        .find_map(|open| ty.strip_prefix(open))
        .and_then(|t| t.strip_suffix('>'))
    {
        inner
    } else {
        ["list[", "List["]
            .iter()
            .find_map(|open| ty.strip_prefix(open))
            .and_then(|t| t.strip_suffix(']'))?
    };
    let element = element.trim();
    (!element.is_empty()).then_some(element)
}

/// Spell a sequence of `element` in `lang`. Rust parameters borrow a slice.
fn sequence_name(lang: Language, element: &str, position: TypePosition) -> Option<String> {
    let name = match lang {
        Language::JavaScript => return None,
        Language::Python => format!("list[{element}]"),
        Language::Java => format!("{element}[]"),
        Language::Cpp => format!("std::vector<{element}>"),
        Language::Go => format!("[]{element}"),
        Language::Rust if position == TypePosition::Param => format!("&[{element}]"),
        Language::Rust => format!("Vec<{element}>"),
    };
    Some(name)
}

/// Translate a type written in `from` into `to`.
///
/// Returns `None` when the type has no known spelling in `to`.
pub fn map_type(ty: &str, from: Language, to: Language, position: TypePosition) -> Option<String> {
    let ty = ty.trim();
    if ty.is_empty() {
        return None;
    }
    if from == to && canonical_type(ty).is_none() {
        return Some(ty.to_string());
    }
    if let Some(canonical) = canonical_type(ty) {
        return type_name(to, canonical, position).map(str::to_string);
    }
    let element = sequence_element(ty)?;
    let element = match canonical_type(element) {
        Some(CanonicalType::Void) => return None,
        Some(canonical) => type_name(to, canonical, TypePosition::Local)?.to_string(),
        None => map_type(element, from, to, TypePosition::Local)?,
    };
    sequence_name(to, &element, position)
}

/// Guess the type of a literal initializer.
pub fn infer_literal(value: &str) -> Option<CanonicalType> {
    let value = value.trim();
    let first = value.chars().next()?;
    if value.len() >= 2 && (first == '"' || first == '\'') && value.ends_with(first) {
        let inner = &value[1..value.len() - 1];
        if !inner.contains(first) {
            return Some(CanonicalType::Str);
        }
    }
    if matches!(value, "true" | "false" | "True" | "False") {
        return Some(CanonicalType::Bool);
    }
    let digits = value.strip_prefix('-').unwrap_or(value);
    if !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit() || c == '_') {
        return Some(CanonicalType::Int);
    }
    let mut parts = digits.splitn(2, '.');
    let whole = parts.next().unwrap_or_default();
    let frac = parts.next();
    if let Some(frac) = frac
        && !whole.is_empty()
        && !frac.is_empty()
        && whole.chars().all(|c| c.is_ascii_digit())
        && frac.chars().all(|c| c.is_ascii_digit())
    {
        return Some(CanonicalType::Float);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_aliases() {
        assert_eq!(canonical_type("Integer"), Some(CanonicalType::Int));
        assert_eq!(canonical_type("const std::string&"), Some(CanonicalType::Str));
        assert_eq!(canonical_type("&str"), Some(CanonicalType::Str));
        assert_eq!(canonical_type("Vec<i64>"), None);
    }

    #[test]
    fn test_map_between_languages() {
        let p = TypePosition::Param;
        assert_eq!(
            map_type("int", Language::Java, Language::Rust, p).as_deref(),
            Some("i64")
        );
        assert_eq!(
            map_type("String", Language::Java, Language::Rust, p).as_deref(),
            Some("&str")
        );
        assert_eq!(
            map_type("str", Language::Python, Language::Cpp, TypePosition::Local).as_deref(),
            Some("std::string")
        );
        assert_eq!(map_type("int", Language::Java, Language::JavaScript, p), None);
        assert_eq!(
            map_type("List<Integer>", Language::Java, Language::Java, p).as_deref(),
            Some("List<Integer>")
        );
        assert_eq!(map_type("List<Integer>", Language::Java, Language::Go, p), None);
    }

    #[test]
    fn test_map_sequences() {
        let p = TypePosition::Param;
        assert_eq!(sequence_element("String[]"), Some("String"));
        assert_eq!(sequence_element("const std::vector<int>&"), Some("int"));
        assert_eq!(sequence_element("Vec<Vec<i64>>"), Some("Vec<i64>"));
        assert_eq!(sequence_element("Map<String, Integer>"), None);
        assert_eq!(
            map_type("String[]", Language::Java, Language::Rust, p).as_deref(),
            Some("&[String]")
        );
        assert_eq!(
            map_type("String[]", Language::Java, Language::Rust, TypePosition::Local).as_deref(),
            Some("Vec<String>")
        );
        assert_eq!(
            map_type("String[]", Language::Java, Language::Go, p).as_deref(),
            Some("[]string")
        );
        assert_eq!(
            map_type("[]int", Language::Go, Language::Cpp, p).as_deref(),
            Some("std::vector<int>")
        );
        assert_eq!(
            map_type("list[str]", Language::Python, Language::Java, p).as_deref(),
            Some("String[]")
        );
        assert_eq!(
            map_type("&[f64]", Language::Rust, Language::Python, p).as_deref(),
            Some("list[float]")
        );
        assert_eq!(
            map_type("Vec<Vec<i64>>", Language::Rust, Language::Go, p).as_deref(),
            Some("[][]int")
        );
        assert_eq!(map_type("int[]", Language::Java, Language::JavaScript, p), None);
        assert_eq!(map_type("Widget[]", Language::Java, Language::Go, p), None);
    }

    #[test]
    fn test_infer_literal() {
        assert_eq!(infer_literal("42"), Some(CanonicalType::Int));
        assert_eq!(infer_literal("-3.5"), Some(CanonicalType::Float));
        assert_eq!(infer_literal("\"hi\""), Some(CanonicalType::Str));
        assert_eq!(infer_literal("True"), Some(CanonicalType::Bool));
        assert_eq!(infer_literal("foo(1)"), None);
        assert_eq!(infer_literal("\"a\" + \"b\""), None);
    }
}
