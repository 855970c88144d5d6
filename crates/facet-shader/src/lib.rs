//! Splitter for combined **`.shader`** source files.
//!
//! A combined file holds every pipeline stage in one text file, with
//! `#shader` marker lines selecting the stage the following lines belong to:
//!
//! ```text
//! #shader vertex
//! void main() { gl_Position = vec4(0.0); }
//! #shader fragment
//! void main() { }
//! ```
//!
//! This crate is intentionally dependency-free so it can be consumed by
//! build tooling and editors without pulling in any GL or window code.
//!
//! # Quick start
//!
//! ```rust
//! use facet_shader::split_str;
//!
//! let bundle = split_str("#shader vertex\nvoid main() { }\n");
//! assert_eq!(bundle.vertex, "void main() { }\n");
//! assert_eq!(bundle.fragment, "");
//! ```

pub mod error;
pub mod source;

pub use error::SourceError;
pub use source::{split_file, split_str, SourceBundle, StageKind};

#[cfg(test)]
mod split_tests {
    use super::*;

    #[test]
    fn two_block_file() {
        let bundle = split_str("#shader vertex\na\nb\n#shader fragment\nc\n");
        assert_eq!(bundle.vertex, "a\nb\n");
        assert_eq!(bundle.fragment, "c\n");
    }

    #[test]
    fn empty_input() {
        assert_eq!(split_str(""), SourceBundle::default());
    }

    #[test]
    fn no_markers_yields_empty_fragments() {
        let bundle = split_str("void main() { }\nmore text\n");
        assert_eq!(bundle.vertex, "");
        assert_eq!(bundle.fragment, "");
    }

    #[test]
    fn lines_before_first_marker_dropped() {
        let bundle = split_str("// header\n#shader vertex\nkept\n");
        assert_eq!(bundle.vertex, "kept\n");
    }

    #[test]
    fn fragment_before_vertex() {
        let bundle = split_str("#shader fragment\nf\n#shader vertex\nv\n");
        assert_eq!(bundle.vertex, "v\n");
        assert_eq!(bundle.fragment, "f\n");
    }

    #[test]
    fn repeated_stage_blocks_concatenate() {
        let bundle = split_str("#shader vertex\nfirst\n#shader fragment\nf\n#shader vertex\nsecond\n");
        assert_eq!(bundle.vertex, "first\nsecond\n");
        assert_eq!(bundle.fragment, "f\n");
    }

    #[test]
    fn marker_lines_never_in_output() {
        let bundle = split_str("#shader vertex\n#shader fragment\nbody\n");
        assert!(!bundle.vertex.contains("#shader"));
        assert!(!bundle.fragment.contains("#shader"));
        assert_eq!(bundle.fragment, "body\n");
    }

    #[test]
    fn marker_without_keyword_keeps_stage_and_is_consumed() {
        let bundle = split_str("#shader vertex\na\n#shader geometry\nb\n");
        assert_eq!(bundle.vertex, "a\nb\n");
        assert_eq!(bundle.fragment, "");
    }

    #[test]
    fn marker_with_both_keywords_prefers_vertex() {
        let bundle = split_str("#shader vertex fragment\nbody\n");
        assert_eq!(bundle.vertex, "body\n");
        assert_eq!(bundle.fragment, "");
    }

    #[test]
    fn no_trailing_newline_on_last_line_still_terminated() {
        let bundle = split_str("#shader vertex\nlast line");
        assert_eq!(bundle.vertex, "last line\n");
    }

    #[test]
    fn blank_lines_preserved() {
        let bundle = split_str("#shader vertex\n\na\n\n");
        assert_eq!(bundle.vertex, "\na\n\n");
    }

    #[test]
    fn stage_accessor_matches_fields() {
        let bundle = split_str("#shader vertex\nv\n#shader fragment\nf\n");
        assert_eq!(bundle.stage(StageKind::Vertex), bundle.vertex);
        assert_eq!(bundle.stage(StageKind::Fragment), bundle.fragment);
    }

    #[test]
    fn stage_labels() {
        assert_eq!(StageKind::Vertex.label(), "vertex");
        assert_eq!(StageKind::Fragment.label(), "fragment");
    }

    #[test]
    fn split_file_missing_path_errors() {
        let err = split_file("no/such/file.shader").unwrap_err();
        assert!(err.to_string().contains("no/such/file.shader"));
    }
}
