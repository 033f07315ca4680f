//! crates/cli/src/template.rs
//! Positional `{}` templates for the probe's `--format` option.

/// Failure to fill a template from the supplied operands.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TemplateError {
    /// A `{}` placeholder had no operand left to fill it.
    #[error("template placeholder #{index} has no matching MESSAGE operand")]
    MissingArgument {
        /// Zero-based placeholder index.
        index: usize,
    },
    /// More operands were given than the template consumes.
    #[error("{unused} MESSAGE operand(s) not used by the template")]
    UnusedArguments {
        /// Number of leftover operands.
        unused: usize,
    },
    /// A lone `{` or `}` appeared outside a placeholder.
    #[error("unmatched '{brace}' at byte {position} (use '{{{{' or '}}}}' for a literal brace)")]
    UnmatchedBrace {
        /// The offending brace.
        brace: char,
        /// Byte offset in the template.
        position: usize,
    },
}

/// Replaces each `{}` in `template` with the next operand.
///
/// `{{` and `}}` produce literal braces. Every operand must be consumed.
pub fn expand_template(template: &str, operands: &[String]) -> Result<String, TemplateError> {
    let mut rendered = String::with_capacity(template.len());
    let mut remaining = operands.iter();
    let mut index = 0;
    let mut chars = template.char_indices().peekable();

    while let Some((position, ch)) = chars.next() {
        match ch {
            '{' if chars.next_if(|&(_, next)| next == '{').is_some() => rendered.push('{'),
            '{' if chars.next_if(|&(_, next)| next == '}').is_some() => {
                let operand = remaining
                    .next()
                    .ok_or(TemplateError::MissingArgument { index })?;
                rendered.push_str(operand);
                index += 1;
            }
            '}' if chars.next_if(|&(_, next)| next == '}').is_some() => rendered.push('}'),
            '{' | '}' => {
                return Err(TemplateError::UnmatchedBrace {
                    brace: ch,
                    position,
                });
            }
            _ => rendered.push(ch),
        }
    }

    match remaining.len() {
        0 => Ok(rendered),
        unused => Err(TemplateError::UnusedArguments { unused }),
    }
}
