//! Resolution of `\prereq` argument lists into typed references.

use super::bracket::{self, Brackets, Delimiter};
use crate::domain::{PrereqRef, RefKind};

/// Parses the raw content of a `\prereq{...}` group.
///
/// The content is a sequence of reference commands, each followed by a
/// `{...}` group holding a comma-separated list of codes:
///
/// ```text
/// \deliverableref{A,B}, \keyprojectref{C}
/// ```
///
/// Every non-empty, trimmed code becomes one [`PrereqRef`], in list order.
/// Reference commands other than `\deliverableref` and `\keyprojectref` are
/// skipped together with their group, as is any text between terms.
#[must_use]
pub fn resolve(raw: &str) -> Vec<PrereqRef> {
    let brackets = Brackets::new(raw);
    let mut refs = Vec::new();
    let mut pos = 0;

    while let Some(found) = raw[pos..].find('\\') {
        let start = pos + found;
        let name_end = raw[start + 1..]
            .find(|c: char| !c.is_ascii_alphabetic())
            .map_or(raw.len(), |n| start + 1 + n);
        let token = &raw[start..name_end];

        let open = name_end + (raw[name_end..].len() - raw[name_end..].trim_start().len());
        let group = match brackets.group(open) {
            Ok(group) if group.delimiter == Delimiter::Curly => group,
            Ok(_) | Err(_) => {
                pos = name_end.max(start + 1);
                continue;
            }
        };
        pos = group.end;

        let Some(kind) = ref_kind(token) else {
            tracing::trace!("skipping unknown reference kind {token}");
            continue;
        };
        refs.extend(
            bracket::flatten(group.inner(raw), Delimiter::Curly)
                .split(',')
                .map(str::trim)
                .filter(|code| !code.is_empty())
                .map(|code| PrereqRef::new(kind, code)),
        );
    }

    refs
}

fn ref_kind(token: &str) -> Option<RefKind> {
    [RefKind::Deliverable, RefKind::Project]
        .into_iter()
        .find(|kind| kind.command() == token)
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;

    fn d(code: &str) -> PrereqRef {
        PrereqRef::new(RefKind::Deliverable, code)
    }

    fn p(code: &str) -> PrereqRef {
        PrereqRef::new(RefKind::Project, code)
    }

    #[test]
    fn mixed_kinds_in_order() {
        assert_eq!(
            resolve(r"\deliverableref{A,B} \keyprojectref{C}"),
            [d("A"), d("B"), p("C")]
        );
    }

    #[test]
    fn comma_separated_terms() {
        assert_eq!(
            resolve(r"\deliverableref{TJP2-DC1-SW1}, \deliverableref{CI5}"),
            [d("TJP2-DC1-SW1"), d("CI5")]
        );
    }

    #[test_case(r"\deliverableref{A, B ,}"; "trailing separator")]
    #[test_case(r"\deliverableref{ A ,, B }"; "empty entry")]
    #[test_case("\\deliverableref\n  {A,\n B}"; "whitespace before group")]
    fn identifiers_are_trimmed(raw: &str) {
        assert_eq!(resolve(raw), [d("A"), d("B")]);
    }

    #[test]
    fn unknown_reference_kinds_are_skipped() {
        assert_eq!(
            resolve(r"\taskref{X,Y} \keyprojectref{C} \citep{paper}"),
            [p("C")]
        );
    }

    #[test]
    fn commands_without_group_are_skipped() {
        assert_eq!(resolve(r"\newline \deliverableref{A}"), [d("A")]);
    }

    #[test]
    fn unterminated_group_yields_nothing_after_it() {
        assert_eq!(resolve(r"\deliverableref{A} \keyprojectref{B"), [d("A")]);
    }

    #[test_case(""; "empty")]
    #[test_case("   "; "whitespace")]
    #[test_case(r"\deliverableref{}"; "empty list")]
    #[test_case("no references here"; "plain text")]
    fn yields_nothing(raw: &str) {
        assert!(resolve(raw).is_empty());
    }

    #[test]
    fn many_unterminated_square_groups() {
        let raw = format!("{}\\deliverableref{{A}}", "\\x[".repeat(50_000));
        assert_eq!(resolve(&raw), [d("A")]);
    }

    #[test]
    fn trailing_backslash_is_ignored() {
        assert_eq!(resolve(r"\deliverableref{A} \"), [d("A")]);
    }
}
