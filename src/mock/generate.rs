//! Schema-conformant JSON sample generation
//!
//! Mirrors the parameter tree into pretty-printed JSON with a fixed
//! four-space indent unit. Scalar values are pseudo-random within the
//! configured bounds, or fixed when [`GenerateOptions::fixed`] is used so
//! that repeated calls are byte-identical.

use crate::schema::{Param, Type};
use rand::distributions::Alphanumeric;
use rand::Rng;

const INDENT: &str = "    ";

/// Bounds and mode for sample generation. Threaded explicitly into every
/// call; there is no ambient mode flag.
#[derive(Debug, Clone)]
pub struct GenerateOptions {
    /// Produce fixed, repeatable values instead of random ones.
    pub fixed: bool,
    /// Exclusive upper bound on generated array lengths.
    pub max_array_len: usize,
    /// Exclusive upper bound on generated numbers.
    pub max_number: i64,
    pub min_string_len: usize,
    pub max_string_len: usize,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            fixed: false,
            max_array_len: 100,
            max_number: 10_000,
            min_string_len: 5,
            max_string_len: 100,
        }
    }
}

impl GenerateOptions {
    /// Deterministic mode: numbers are 1024, strings `"1024"`, booleans
    /// true, arrays five elements long, enums their first literal.
    pub fn fixed() -> Self {
        Self {
            fixed: true,
            ..Self::default()
        }
    }
}

/// Fabricate a payload conforming to `param`.
///
/// A missing schema generates the literal `null`; a `none` typed schema
/// generates the empty payload.
pub fn generate(param: Option<&Param>, options: &GenerateOptions) -> String {
    let Some(param) = param else {
        return "null".to_string();
    };
    if param.ty == Type::None {
        return String::new();
    }

    let mut writer = Writer {
        out: String::new(),
        depth: 0,
        options,
    };
    writer.write(param, true);
    writer.out
}

struct Writer<'a> {
    out: String,
    depth: usize,
    options: &'a GenerateOptions,
}

impl Writer<'_> {
    fn write(&mut self, param: &Param, check_array: bool) {
        if param.array && check_array {
            self.out.push_str("[\n");
            self.depth += 1;

            let len = self.array_len();
            for index in 0..len {
                self.indent();
                self.write(param, false);
                self.out
                    .push_str(if index + 1 < len { ",\n" } else { "\n" });
            }

            self.depth -= 1;
            self.indent();
            self.out.push(']');
            return;
        }

        match param.ty {
            Type::None => self.out.push_str("null"),
            Type::Bool => {
                let value = self.bool_value();
                self.out.push_str(if value { "true" } else { "false" });
            }
            Type::Number => {
                let value = self.number_value(param);
                self.out.push_str(&value.to_string());
            }
            Type::String => {
                let value = self.string_value(param);
                self.out
                    .push_str(&serde_json::Value::String(value).to_string());
            }
            Type::Object => {
                self.out.push_str("{\n");
                self.depth += 1;

                let last = param.items.len().saturating_sub(1);
                for (index, item) in param.items.iter().enumerate() {
                    self.indent();
                    self.out.push('"');
                    self.out.push_str(&item.name);
                    self.out.push_str("\": ");
                    self.write(item, true);
                    self.out
                        .push_str(if index < last { ",\n" } else { "\n" });
                }

                self.depth -= 1;
                self.indent();
                self.out.push('}');
            }
        }
    }

    fn indent(&mut self) {
        for _ in 0..self.depth {
            self.out.push_str(INDENT);
        }
    }

    fn array_len(&self) -> usize {
        if self.options.fixed {
            return 5;
        }
        rand::thread_rng().gen_range(1..self.options.max_array_len.max(2))
    }

    fn bool_value(&self) -> bool {
        if self.options.fixed {
            return true;
        }
        rand::thread_rng().gen()
    }

    fn number_value(&self, param: &Param) -> i64 {
        if param.is_enum() {
            let index = if self.options.fixed {
                0
            } else {
                rand::thread_rng().gen_range(0..param.enums.len())
            };
            // Enum values on number params passed the integer check at
            // decode time.
            return param.enums[index].value.parse().unwrap_or_default();
        }
        if self.options.fixed {
            return 1024;
        }
        rand::thread_rng().gen_range(0..self.options.max_number)
    }

    fn string_value(&self, param: &Param) -> String {
        if param.is_enum() {
            let index = if self.options.fixed {
                0
            } else {
                rand::thread_rng().gen_range(0..param.enums.len())
            };
            return param.enums[index].value.clone();
        }
        if self.options.fixed {
            return "1024".to_string();
        }
        let mut rng = rand::thread_rng();
        let len = rng.gen_range(self.options.min_string_len..=self.options.max_string_len);
        rng.sample_iter(&Alphanumeric)
            .take(len)
            .map(char::from)
            .collect()
    }
}
