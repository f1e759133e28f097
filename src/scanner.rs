use anyhow::{Context, Result, bail};
use indexmap::IndexMap;

use crate::error::ExtractError;
use crate::normalize::normalize_text;
use crate::pattern::SectionPattern;
use crate::reader::PageSource;

/// Body pass: walk pages from `start_page`, carving each section's text at the
/// point where the following section's title reappears. Text accumulated for a
/// section carries across page boundaries until that boundary is found; the
/// section index only ever advances.
pub fn extract_section_content(
    source: &dyn PageSource,
    start_page: usize,
    sections: &[String],
) -> Result<IndexMap<String, String>> {
    if sections.is_empty() {
        bail!(ExtractError::Data(
            "no sections found in table of contents".to_string()
        ));
    }

    let patterns = sections
        .iter()
        .map(|section| SectionPattern::build(section))
        .collect::<Result<Vec<_>, _>>()
        .context("failed to compile section patterns")?;

    let mut bodies: IndexMap<String, String> = IndexMap::new();
    let mut index = 0_usize;
    let mut in_section = false;
    let mut accumulated = String::new();

    for page in start_page..source.page_count() {
        let raw = source
            .page_text(page)
            .with_context(|| format!("failed to read page {page} during body pass"))?;
        let text = normalize_text(&raw);
        let mut window = text.as_str();

        loop {
            // Before the first section is located its title is the target;
            // afterwards the current section ends where the next title begins.
            let target = if in_section { index + 1 } else { index };

            if target >= sections.len() {
                // Already on the last section: the rest of the page is its.
                append_fragment(&mut accumulated, window);
                break;
            }

            let Some(hit) = patterns[target].locate(window) else {
                if in_section {
                    append_fragment(&mut accumulated, window);
                }
                // Text ahead of the first section title is front matter.
                break;
            };

            if in_section {
                append_fragment(&mut accumulated, &window[..hit.title_start]);
                bodies.insert(sections[index].clone(), std::mem::take(&mut accumulated));
                index = target;
            } else {
                in_section = true;
            }

            window = &window[hit.body_start..];
        }
    }

    // The last section has no following title to trigger finalization.
    bodies.insert(sections[index].clone(), std::mem::take(&mut accumulated));

    Ok(bodies)
}

fn append_fragment(accumulated: &mut String, fragment: &str) {
    let fragment = fragment.trim();
    if fragment.is_empty() {
        return;
    }
    if !accumulated.is_empty() {
        accumulated.push(' ');
    }
    accumulated.push_str(fragment);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::error_category;
    use crate::reader::testing::StaticSource;

    fn titles(titles: &[&str]) -> Vec<String> {
        titles.iter().map(|title| title.to_string()).collect()
    }

    #[test]
    fn splits_bodies_at_following_titles() {
        let source = StaticSource::new(
            "",
            &["1. Short title first body. 2. Interpretation second body. 3. Application third body to end."],
        );
        let sections = titles(&["1 short title", "2 interpretation", "3 application"]);

        let bodies = extract_section_content(&source, 0, &sections).expect("scan");
        assert_eq!(bodies["1 short title"], "first body");
        assert_eq!(bodies["2 interpretation"], "second body");
        assert_eq!(bodies["3 application"], "third body to end");
        assert_eq!(bodies.len(), 3);
    }

    #[test]
    fn carries_a_body_across_pages_without_loss() {
        let source = StaticSource::new(
            "",
            &[
                "1. Short title the first half",
                "and the second half. 2. Interpretation the rest",
            ],
        );
        let sections = titles(&["1 short title", "2 interpretation"]);

        let bodies = extract_section_content(&source, 0, &sections).expect("scan");
        assert_eq!(
            bodies["1 short title"],
            "the first half and the second half"
        );
        assert_eq!(bodies["2 interpretation"], "the rest");
    }

    #[test]
    fn front_matter_before_the_first_title_is_discarded() {
        let source = StaticSource::new(
            "",
            &["THE DEMO ACT preliminary notes. 1. Short title actual body"],
        );
        let sections = titles(&["1 short title"]);

        let bodies = extract_section_content(&source, 0, &sections).expect("scan");
        assert_eq!(bodies["1 short title"], "actual body");
    }

    #[test]
    fn pages_without_the_first_title_are_skipped() {
        let source = StaticSource::new(
            "",
            &["nothing relevant here", "1. Short title body text"],
        );
        let sections = titles(&["1 short title"]);

        let bodies = extract_section_content(&source, 0, &sections).expect("scan");
        assert_eq!(bodies["1 short title"], "body text");
    }

    #[test]
    fn plural_title_in_body_still_bounds_the_previous_section() {
        let source = StaticSource::new(
            "",
            &["2. Arrest of person by whom made. 3. Applications of acts applied body"],
        );
        let sections = titles(&["2 arrest of person", "3 application of act"]);

        let bodies = extract_section_content(&source, 0, &sections).expect("scan");
        assert_eq!(bodies["2 arrest of person"], "by whom made");
        assert_eq!(bodies["3 application of act"], "applied body");
    }

    #[test]
    fn missing_title_stalls_and_absorbs_the_remainder() {
        let source = StaticSource::new(
            "",
            &["1. Short title body one. 3. Application body three"],
        );
        let sections = titles(&["1 short title", "2 interpretation", "3 application"]);

        let bodies = extract_section_content(&source, 0, &sections).expect("scan");
        assert_eq!(bodies.len(), 1);
        assert_eq!(bodies["1 short title"], "body one 3 application body three");
    }

    #[test]
    fn single_section_takes_every_page_after_its_title() {
        let source = StaticSource::new("", &["1. Short title starts here", "and continues"]);
        let sections = titles(&["1 short title"]);

        let bodies = extract_section_content(&source, 0, &sections).expect("scan");
        assert_eq!(bodies["1 short title"], "starts here and continues");
    }

    #[test]
    fn empty_section_list_is_a_data_error() {
        let source = StaticSource::new("", &["whatever"]);

        let err = extract_section_content(&source, 0, &[]).expect_err("must fail");
        assert_eq!(error_category(&err), "data");
    }

    #[test]
    fn title_never_found_yields_an_empty_last_body() {
        let source = StaticSource::new("", &["unrelated page text"]);
        let sections = titles(&["1 short title"]);

        let bodies = extract_section_content(&source, 0, &sections).expect("scan");
        assert_eq!(bodies["1 short title"], "");
    }
}
