//! String formatting, `s ?` type characters.

use crate::error::Result;
use crate::fmt::fill_size;
use crate::interp::FormatContext;
use crate::sink::append_escaped_str;
use crate::spec::{Align, StdFormatSpec};
use crate::unicode::CodepointExt;

pub struct StringFormatter {
    data: StdFormatSpec,
}

impl StringFormatter {
    pub fn new(spec: StdFormatSpec) -> Self {
        let mut data = spec;
        data.ty = spec.type_or('s');
        data.fill = spec.fill_or(' ');
        if data.align == Align::Default {
            data.align = Align::Left;
        }
        Self { data }
    }

    pub fn format(&self, s: &str, ctx: &mut FormatContext<'_, '_>) -> Result<()> {
        if self.data.ty == '?' {
            append_escaped_str(ctx.out(), s);
            return Ok(());
        }

        let mut content = s;
        let mut used = 0;

        // precision caps the display width for strings
        if self.data.precision != 0 {
            let mut end = s.len();
            for (idx, cp) in s.char_indices() {
                let w = cp.estimate_width();
                if used + w > self.data.precision {
                    end = idx;
                    break;
                }
                used += w;
            }
            content = &s[..end];
        } else {
            used = s.chars().map(CodepointExt::estimate_width).sum();
        }

        let (left, right) = fill_size(self.data.width, used, self.data.align);

        let out = ctx.out();
        out.push_char_n(self.data.fill, left);
        out.push_str(content);
        out.push_char_n(self.data.fill, right);
        Ok(())
    }
}
