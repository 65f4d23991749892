use std::fmt;

/// Wraps a passenger email so log lines never carry the full address.
///
/// `jane.doe@example.com` renders as `j***@example.com`; anything without an
/// `@` renders as `********`.
#[derive(Clone, Copy)]
pub struct Masked<'a>(pub &'a str);

impl fmt::Display for Masked<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0.trim().split_once('@') {
            Some((local, domain)) if !local.is_empty() => {
                let first = local.chars().next().unwrap_or('*');
                write!(f, "{}***@{}", first, domain)
            }
            _ => write!(f, "********"),
        }
    }
}

impl fmt::Debug for Masked<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}
