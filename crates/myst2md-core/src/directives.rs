//! Block directive rewrites
//!
//! Each function handles one directive family and rewrites every occurrence in
//! the document. Directives are recognised by an opening fence of exactly three
//! backticks followed by `{name}`:
//!
//! ````markdown
//! ```{note}
//! Watch out.
//! ```
//! ````
//!
//! Blocks whose fences do not line up with the expected shape are left alone.

use regex::{Captures, Regex};
use std::sync::LazyLock;

use crate::labels::LABELED_MATH;

static RAW_JUPYTER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?ms)^```\{raw\} jupyter[ \t]*\n.*?^```[ \t]*(?:\n|\z)").unwrap()
});

static CONTENTS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?m)^```\{contents\}[^\n]*\n(?::[\w-]+:[^\n]*\n)*?:depth:[^\n]*\n(?::[\w-]+:[^\n]*\n)*```[ \t]*(?:\n|\z)",
    )
    .unwrap()
});

static EPIGRAPH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?ms)^```\{epigraph\}[ \t]*\n(.*?)\n```[ \t]*$").unwrap()
});

static CODE_CELL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^```\{code-cell\}[ \t]+([\w.+-]+)[ \t]*\n(?:[ \t]*:[\w-]+:[^\n]*\n)*")
        .unwrap()
});

static INDEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?ms)^```\{index\}.*?^```[ \t]*(?:\n|\z)").unwrap()
});

static NOTE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?ms)^```\{note\}[ \t]*\n(.*?)\n```[ \t]*$").unwrap()
});

static EXERCISE_START: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^```\{exercise-start\}[^\n]*\n(?::[\w-]+:[^\n]*\n)*```[ \t]*(?:\n|\z)")
        .unwrap()
});

static EXERCISE_END: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^```\{exercise-end\}[ \t]*\n```[ \t]*(?:\n|\z)").unwrap()
});

static EXERCISE_SINGLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?ms)^```\{exercise\}[^\n]*\n:label:[^\n]*\n(?::[\w-]+:[^\n]*\n)*(?:(.*?)\n)??```[ \t]*$",
    )
    .unwrap()
});

static SOLUTION_START: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^```\{solution-start\}[^\n]*\n(?::[\w-]+:[^\n]*\n)*```[ \t]*(?:\n|\z)")
        .unwrap()
});

static SOLUTION_END: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^```\{solution-end\}[ \t]*\n```[ \t]*(?:\n|\z)").unwrap()
});

static FIGURE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?ms)^```\{figure\}.*?^```[ \t]*(?:\n|\z)").unwrap()
});

static LABEL_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^\([A-Za-z_][A-Za-z0-9_-]*\)=[ \t]*(?:\n|\z)").unwrap()
});

/// Delete `{raw} jupyter` blocks together with their content
pub fn remove_raw_blocks(content: &str) -> String {
    RAW_JUPYTER.replace_all(content, "").into_owned()
}

/// Delete `{contents}` blocks that carry a `:depth:` option
pub fn remove_contents(content: &str) -> String {
    CONTENTS.replace_all(content, "").into_owned()
}

/// Convert `{epigraph}` blocks to block quotes
pub fn convert_epigraphs(content: &str) -> String {
    EPIGRAPH
        .replace_all(content, |caps: &Captures| {
            let quoted: Vec<String> = caps[1]
                .trim()
                .lines()
                .map(|line| {
                    if line.trim().is_empty() {
                        ">".to_string()
                    } else {
                        format!("> {line}")
                    }
                })
                .collect();
            format!("{}\n", quoted.join("\n"))
        })
        .into_owned()
}

/// Map a notebook kernel name to the info string of a plain code fence
///
/// IPython kernels are reported under their kernel name (`ipython3`), which
/// markdown highlighters do not know.
pub fn fence_language(kernel: &str) -> &str {
    match kernel {
        "ipython3" | "ipython" | "python3" => "python",
        other => other,
    }
}

/// Turn `{code-cell} <lang>` openers into plain code fences
///
/// Option lines directly after the opener (`:tags: [...]` and friends) are
/// dropped. The cell body and closing fence are untouched.
pub fn convert_code_cells(content: &str) -> String {
    CODE_CELL
        .replace_all(content, |caps: &Captures| {
            format!("```{}\n", fence_language(&caps[1]))
        })
        .into_owned()
}

/// Delete `{index}` blocks
pub fn remove_index_entries(content: &str) -> String {
    INDEX.replace_all(content, "").into_owned()
}

/// Convert labeled `{math}` blocks to `$$` display math, dropping the label
pub fn convert_math_blocks(content: &str) -> String {
    LABELED_MATH
        .replace_all(content, |caps: &Captures| {
            format!("$$\n{}\n$$\n", caps[2].trim())
        })
        .into_owned()
}

/// Convert `{note}` blocks to a paragraph introduced by a bold marker
pub fn convert_notes(content: &str) -> String {
    NOTE.replace_all(content, |caps: &Captures| {
        format!("**Note:** {}\n", caps[1].trim())
    })
    .into_owned()
}

/// Replace exercise and solution markers with headings
///
/// Start markers become `## Exercise` / `## Solution`, end markers are
/// deleted, and a single `{exercise}` block is unwrapped under its heading.
/// Content between markers stays where it is.
pub fn convert_exercises(content: &str) -> String {
    let content = EXERCISE_START.replace_all(content, "## Exercise\n");
    let content = EXERCISE_END.replace_all(&content, "");
    let content = EXERCISE_SINGLE.replace_all(&content, |caps: &Captures| {
        match caps.get(1).map_or("", |body| body.as_str().trim_matches('\n')) {
            "" => "## Exercise\n".to_string(),
            body => format!("## Exercise\n\n{body}\n"),
        }
    });
    let content = SOLUTION_START.replace_all(&content, "## Solution\n");
    SOLUTION_END.replace_all(&content, "").into_owned()
}

/// Delete `{figure}` blocks; the image files are not shipped with the output
pub fn remove_figures(content: &str) -> String {
    FIGURE.replace_all(content, "").into_owned()
}

/// Delete standalone target lines such as `(mccall)=`
pub fn remove_label_lines(content: &str) -> String {
    LABEL_LINE.replace_all(content, "").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_remove_raw_blocks() {
        let input = "Before\n\n```{raw} jupyter\n<div id=\"qe-notebook-header\">\n</div>\n```\n\nAfter\n";
        assert_eq!(remove_raw_blocks(input), "Before\n\n\nAfter\n");
    }

    #[test]
    fn test_remove_raw_keeps_other_raw_targets() {
        let input = "```{raw} html\n<br>\n```\n";
        assert_eq!(remove_raw_blocks(input), input);
    }

    #[test]
    fn test_remove_raw_adjacent_blocks() {
        let input = "```{raw} jupyter\na\n```\nkeep\n```{raw} jupyter\nb\n```\n";
        assert_eq!(remove_raw_blocks(input), "keep\n");
    }

    #[test]
    fn test_remove_contents() {
        let input = "# Title\n\n```{contents} Contents\n:depth: 2\n```\n\nText\n";
        assert_eq!(remove_contents(input), "# Title\n\n\nText\n");
    }

    #[test]
    fn test_remove_contents_without_depth_is_kept() {
        let input = "```{contents}\n:local:\n```\n";
        assert_eq!(remove_contents(input), input);
    }

    #[test]
    fn test_remove_contents_at_end_of_file() {
        assert_eq!(remove_contents("x\n```{contents}\n:depth: 1\n```"), "x\n");
    }

    #[test]
    fn test_convert_epigraph() {
        let input = "```{epigraph}\n\"Questioning a man's choices\" -- Someone\n```\n";
        assert_eq!(
            convert_epigraphs(input),
            "> \"Questioning a man's choices\" -- Someone\n\n"
        );
    }

    #[test]
    fn test_convert_epigraph_multiline() {
        let input = "```{epigraph}\nFirst line\n\n-- Author\n```\n";
        assert_eq!(convert_epigraphs(input), "> First line\n>\n> -- Author\n\n");
    }

    #[test]
    fn test_convert_epigraph_adjacent_blocks() {
        let input = "```{epigraph}\nA\n```\nmid\n```{epigraph}\nB\n```\n";
        assert_eq!(convert_epigraphs(input), "> A\n\nmid\n> B\n\n");
    }

    #[test]
    fn test_convert_code_cell_with_tags() {
        let input = "```{code-cell} ipython3\n:tags: [hide-output]\n\n!pip install quantecon\n```\n";
        assert_eq!(
            convert_code_cells(input),
            "```python\n\n!pip install quantecon\n```\n"
        );
    }

    #[test]
    fn test_convert_code_cell_without_tags() {
        let input = "```{code-cell} ipython3\nimport numpy as np\n```\n";
        assert_eq!(convert_code_cells(input), "```python\nimport numpy as np\n```\n");
    }

    #[test]
    fn test_convert_code_cell_other_language() {
        let input = "```{code-cell} julia\nx = 1\n```\n";
        assert_eq!(convert_code_cells(input), "```julia\nx = 1\n```\n");
    }

    #[test]
    fn test_tags_outside_code_cells_are_kept() {
        let input = "```{figure} img.png\n:tags: keep\n```\n";
        assert_eq!(convert_code_cells(input), input);
    }

    #[test]
    fn test_fence_language() {
        assert_eq!(fence_language("ipython3"), "python");
        assert_eq!(fence_language("python3"), "python");
        assert_eq!(fence_language("r"), "r");
    }

    #[test]
    fn test_remove_index_entries() {
        let input = "```{index} single: Models; Job Search\n```\n\nText\n";
        assert_eq!(remove_index_entries(input), "\nText\n");
    }

    #[test]
    fn test_remove_index_adjacent_blocks() {
        let input = "```{index} single: A\n```\nmid\n```{index} single: B\n```\n";
        assert_eq!(remove_index_entries(input), "mid\n");
    }

    #[test]
    fn test_convert_math_block() {
        let input = "```{math}\n:label: odu_pv\n\n  v(w) = \\max \\{ w, c \\}  \n```\n";
        assert_eq!(
            convert_math_blocks(input),
            "$$\nv(w) = \\max \\{ w, c \\}\n$$\n\n"
        );
    }

    #[test]
    fn test_convert_math_adjacent_blocks() {
        let input = "```{math}\n:label: a\n\nx\n```\n```{math}\n:label: b\n\ny\n```\n";
        assert_eq!(convert_math_blocks(input), "$$\nx\n$$\n\n$$\ny\n$$\n\n");
    }

    #[test]
    fn test_unlabeled_math_is_kept() {
        let input = "```{math}\nx = 1\n```\n";
        assert_eq!(convert_math_blocks(input), input);
    }

    #[test]
    fn test_convert_note() {
        assert_eq!(
            convert_notes("```{note}\nWatch out.\n```"),
            "**Note:** Watch out.\n"
        );
    }

    #[test]
    fn test_convert_note_adjacent_blocks() {
        let input = "```{note}\nA\n```\nmid\n```{note}\nB\n```\n";
        assert_eq!(convert_notes(input), "**Note:** A\n\nmid\n**Note:** B\n\n");
    }

    #[test]
    fn test_convert_note_multiline_body() {
        let input = "```{note}\n  First line\nsecond line\n```\n";
        assert_eq!(
            convert_notes(input),
            "**Note:** First line\nsecond line\n\n"
        );
    }

    #[test]
    fn test_convert_exercise_markers() {
        let input = "\
```{exercise-start}
:label: mm_ex1
```

Compute the mean.

```{exercise-end}
```

```{solution-start} mm_ex1
:class: dropdown
```

Here is one solution.

```{solution-end}
```
";
        let expected = "\
## Exercise

Compute the mean.


## Solution

Here is one solution.

";
        assert_eq!(convert_exercises(input), expected);
    }

    #[test]
    fn test_convert_single_exercise() {
        let input = "```{exercise}\n:label: ex2\n\nShow that h is finite.\n```\n";
        assert_eq!(
            convert_exercises(input),
            "## Exercise\n\nShow that h is finite.\n\n"
        );
    }

    #[test]
    fn test_convert_single_exercise_without_body() {
        let input = "```{exercise}\n:label: e\n```\n\nNext paragraph.\n\n```python\nx = 1\n```\n";
        assert_eq!(
            convert_exercises(input),
            "## Exercise\n\n\nNext paragraph.\n\n```python\nx = 1\n```\n"
        );
    }

    #[test]
    fn test_convert_single_exercise_stops_at_own_fence() {
        let input = "```{exercise}\n:label: a\n\nFirst.\n```\n\n```{exercise}\n:label: b\n\nSecond.\n```\n";
        assert_eq!(
            convert_exercises(input),
            "## Exercise\n\nFirst.\n\n\n## Exercise\n\nSecond.\n\n"
        );
    }

    #[test]
    fn test_remove_figures() {
        let input = "```{figure} /_static/fig.png\n:scale: 50%\n\nCaption\n```\n\nText\n";
        assert_eq!(remove_figures(input), "\nText\n");
    }

    #[test]
    fn test_remove_figures_adjacent_blocks() {
        let input = "```{figure} a.png\n```\nmid\n```{figure} b.png\n:scale: 50%\n```\n";
        assert_eq!(remove_figures(input), "mid\n");
    }

    #[test]
    fn test_remove_label_lines() {
        let input = "(mccall)=\n# Job Search\n\n(my-label)=\nText (not_a_label)=\n";
        assert_eq!(
            remove_label_lines(input),
            "# Job Search\n\nText (not_a_label)=\n"
        );
    }

    #[test]
    fn test_stages_leave_plain_text_alone() {
        let input = "# Title\n\nSome text with `code` and a list:\n\n- one\n- two\n\n```python\nx = 1\n```\n";
        assert_eq!(remove_raw_blocks(input), input);
        assert_eq!(remove_contents(input), input);
        assert_eq!(convert_epigraphs(input), input);
        assert_eq!(convert_code_cells(input), input);
        assert_eq!(remove_index_entries(input), input);
        assert_eq!(convert_math_blocks(input), input);
        assert_eq!(convert_notes(input), input);
        assert_eq!(convert_exercises(input), input);
        assert_eq!(remove_figures(input), input);
        assert_eq!(remove_label_lines(input), input);
    }
}
