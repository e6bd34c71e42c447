use tocsmith_traits::{FontRole, TextMeasurer};

/// Replaces every character the `role` face cannot draw with `?`.
///
/// Run before measuring so that widths match what is painted.
pub fn sanitize_text<M: TextMeasurer + ?Sized>(measurer: &M, text: &str, role: FontRole) -> String {
    text.chars()
        .map(|c| if measurer.supports(c, role) { c } else { '?' })
        .collect()
}
