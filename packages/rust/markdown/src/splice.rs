//! Two-index text splice between a start and end marker.

use contriblinks_shared::MarkerPair;

use crate::RegionOutcome;

/// Replace the first `start .. end` span of `text` with
/// `start + "\n" + body + "\n" + end`.
///
/// The end marker is searched only after the start marker. If either is
/// missing the input is returned unchanged.
pub fn splice_region(text: &str, markers: MarkerPair, body: &str) -> (String, RegionOutcome) {
    let Some(start_idx) = text.find(markers.start) else {
        return (text.to_string(), RegionOutcome::MarkersNotFound);
    };
    let after_start = start_idx + markers.start.len();

    let Some(end_offset) = text[after_start..].find(markers.end) else {
        return (text.to_string(), RegionOutcome::MarkersNotFound);
    };
    let end_idx = after_start + end_offset + markers.end.len();

    let mut out = String::with_capacity(
        text.len() - (end_idx - start_idx) + markers.start.len() + body.len() + markers.end.len() + 2,
    );
    out.push_str(&text[..start_idx]);
    out.push_str(markers.start);
    out.push('\n');
    out.push_str(body);
    out.push('\n');
    out.push_str(markers.end);
    out.push_str(&text[end_idx..]);

    (out, RegionOutcome::Replaced)
}

#[cfg(test)]
mod tests {
    use super::*;

    const MARKERS: MarkerPair = MarkerPair {
        start: "<!-- A start -->",
        end: "<!-- A end -->",
    };

    #[test]
    fn splices_between_markers() {
        let (out, outcome) = splice_region("x<!-- A start -->old<!-- A end -->y", MARKERS, "new");
        assert_eq!(outcome, RegionOutcome::Replaced);
        assert_eq!(out, "x<!-- A start -->\nnew\n<!-- A end -->y");
    }

    #[test]
    fn only_first_pair_is_replaced() {
        let text = "<!-- A start -->1<!-- A end -->|<!-- A start -->2<!-- A end -->";
        let (out, _) = splice_region(text, MARKERS, "n");
        assert_eq!(out, "<!-- A start -->\nn\n<!-- A end -->|<!-- A start -->2<!-- A end -->");
    }

    #[test]
    fn end_before_start_is_not_found() {
        let text = "<!-- A end -->middle<!-- A start -->";
        let (out, outcome) = splice_region(text, MARKERS, "n");
        assert_eq!(outcome, RegionOutcome::MarkersNotFound);
        assert_eq!(out, text);
    }

    #[test]
    fn missing_start_is_not_found() {
        let (out, outcome) = splice_region("nothing here<!-- A end -->", MARKERS, "n");
        assert_eq!(outcome, RegionOutcome::MarkersNotFound);
        assert_eq!(out, "nothing here<!-- A end -->");
    }

    #[test]
    fn crlf_outside_region_is_preserved() {
        let text = "a\r\n<!-- A start -->\r\nold\r\n<!-- A end -->\r\nb\r\n";
        let (out, _) = splice_region(text, MARKERS, "new");
        assert_eq!(out, "a\r\n<!-- A start -->\nnew\n<!-- A end -->\r\nb\r\n");
    }
}
