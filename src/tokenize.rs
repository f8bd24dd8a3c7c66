use anyhow::Context;

/// Matches a maximal run of non-whitespace or whitespace characters.
/// Every character of the input belongs to exactly one run, so joining
/// the runs back together reproduces the original line byte for byte.
const WORD_RUN_REGEX: &str = r"\S+|\s+";

pub fn split_lines(text: &str) -> Vec<&str> {
    text.lines().collect()
}

pub fn split_word_runs(line: &str) -> anyhow::Result<Vec<&str>> {
    let re = regex::Regex::new(WORD_RUN_REGEX)
        .with_context(|| format!("invalid word run regex: {WORD_RUN_REGEX}"))?;

    Ok(re.find_iter(line).map(|m| m.as_str()).collect())
}
