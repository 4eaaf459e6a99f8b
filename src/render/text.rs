use smallvec::SmallVec;

/// Selected char range of a text run. Negative bounds are treated as 0.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TextSelection {
    /// First selected char.
    pub start: i32,
    /// One past the last selected char.
    pub end: i32,
}

impl TextSelection {
    /// Build a [`TextSelection`] value.
    pub const fn new(start: i32, end: i32) -> Self {
        Self { start, end }
    }
}

/// Piece of a text with uniform selection state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TextRun<'a> {
    /// The run text, borrowed from the input.
    pub text: &'a str,
    /// Whether the run is drawn with the selection color.
    pub selected: bool,
}

/// Split `text` into unselected prefix, selected middle and unselected suffix.
///
/// Bounds are char indices, clamped into the text; an end before the start selects nothing.
/// Empty pieces are dropped, so the result has between zero and three runs.
pub fn split_selection(text: &str, selection: TextSelection) -> SmallVec<[TextRun<'_>; 3]> {
    let char_len = text.chars().count();
    let clamp = |i: i32| usize::try_from(i).unwrap_or(0).min(char_len);
    let start = clamp(selection.start);
    let end = clamp(selection.end).max(start);

    let (mut start_byte, mut end_byte) = (text.len(), text.len());
    for (i, (b, _)) in text.char_indices().enumerate() {
        if i == start {
            start_byte = b;
        }
        if i == end {
            end_byte = b;
            break;
        }
    }
    let (start, end) = (start_byte, end_byte);

    [
        TextRun {
            text: &text[..start],
            selected: false,
        },
        TextRun {
            text: &text[start..end],
            selected: true,
        },
        TextRun {
            text: &text[end..],
            selected: false,
        },
    ]
    .into_iter()
    .filter(|run| !run.text.is_empty())
    .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/render/text.rs"]
mod tests;
