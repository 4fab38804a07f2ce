//! Broken-down calendar time, gated behind the `chrono` feature.

use crate::error::{FormatError, Result};
use crate::interp::{FormatContext, ParseContext};
use crate::value::{OwnedValue, ToValue, UserValue, Value};

/// A broken-down calendar time in the C `tm` convention: `year` is the
/// full year, `month` counts from zero, `wday` starts at Sunday.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BrokenDownTime {
    pub year: i32,
    pub month: u32,
    pub mday: u32,
    pub hour: u32,
    pub min: u32,
    pub sec: u32,
    pub wday: u32,
    pub yday: u32,
    pub is_dst: bool,
}

const WEEKDAY_ABBR: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];
const WEEKDAY_FULL: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

impl UserValue for BrokenDownTime {
    fn attribute(&self, name: &str) -> Result<OwnedValue> {
        match name {
            "year" => Ok(Value::I32(self.year)),
            "month" => Ok(Value::U32(self.month)),
            "mday" => Ok(Value::U32(self.mday)),
            "hour" => Ok(Value::U32(self.hour)),
            "min" => Ok(Value::U32(self.min)),
            "sec" => Ok(Value::U32(self.sec)),
            "wday" => Ok(Value::U32(self.wday)),
            "yday" => Ok(Value::U32(self.yday)),
            "is_dst" => Ok(Value::Bool(self.is_dst)),
            _ => Err(FormatError::InvalidAttribute(name.to_owned())),
        }
    }

    /// A `%`-directive subset: `%Y %m %d %H %M %S %j %a %A %%`; other
    /// characters copy through verbatim.
    fn format(
        &self,
        parse: &mut ParseContext<'_>,
        out: &mut FormatContext<'_, '_>,
    ) -> Result<()> {
        let mut body = String::new();
        while let Some(ch) = parse.peek() {
            if ch == '}' {
                break;
            }
            parse.bump();
            if ch != '%' {
                body.push(ch);
                continue;
            }
            let Some(directive) = parse.peek() else {
                return Err(FormatError::invalid_format(
                    "dangling % in a time specification",
                ));
            };
            parse.bump();
            match directive {
                'Y' => body.push_str(&self.year.to_string()),
                'm' => body.push_str(&format!("{:02}", self.month + 1)),
                'd' => body.push_str(&format!("{:02}", self.mday)),
                'H' => body.push_str(&format!("{:02}", self.hour)),
                'M' => body.push_str(&format!("{:02}", self.min)),
                'S' => body.push_str(&format!("{:02}", self.sec)),
                'j' => body.push_str(&format!("{:03}", self.yday + 1)),
                'a' => body.push_str(weekday_name(self.wday, &WEEKDAY_ABBR)?),
                'A' => body.push_str(weekday_name(self.wday, &WEEKDAY_FULL)?),
                '%' => body.push('%'),
                other => {
                    return Err(FormatError::invalid_format(format!(
                        "unsupported time directive %{other}"
                    )))
                }
            }
        }
        if body.is_empty() {
            // default presentation mirrors %Y-%m-%d %H:%M:%S
            body = format!(
                "{}-{:02}-{:02} {:02}:{:02}:{:02}",
                self.year,
                self.month + 1,
                self.mday,
                self.hour,
                self.min,
                self.sec
            );
        }
        out.out().push_str(&body);
        Ok(())
    }
}

fn weekday_name(wday: u32, names: &'static [&'static str; 7]) -> Result<&'static str> {
    names
        .get(wday as usize)
        .copied()
        .ok_or_else(|| FormatError::invalid_format("weekday out of range"))
}

impl ToValue for BrokenDownTime {
    fn to_value(&self) -> OwnedValue {
        Value::independent(*self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::IndexKey;

    fn sample() -> BrokenDownTime {
        BrokenDownTime {
            year: 2024,
            month: 1, // February
            mday: 29,
            hour: 13,
            min: 5,
            sec: 9,
            wday: 4,
            yday: 59,
            is_dst: false,
        }
    }

    #[test]
    fn attributes() {
        let t = sample();
        assert!(matches!(t.attribute("year").unwrap(), Value::I32(2024)));
        assert!(matches!(t.attribute("month").unwrap(), Value::U32(1)));
        assert!(matches!(t.attribute("mday").unwrap(), Value::U32(29)));
        assert!(matches!(t.attribute("is_dst").unwrap(), Value::Bool(false)));
        assert!(t.attribute("tz").is_err());
        assert!(t.index(&IndexKey::Index(0)).is_err());
    }
}
