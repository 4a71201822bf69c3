/// Keeps a row label list aligned after a row mutation.
///
/// Missing labels are represented by empty strings. Labels past the end of
/// the list are only materialized when new labels are supplied, so a proxy
/// that never used labels keeps an empty list.
pub(crate) fn fix_row_labels(
    labels: &mut Vec<String>,
    start: usize,
    count: usize,
    new_labels: &[String],
    is_insert: bool,
) {
    let current = labels.len();

    if start >= current {
        if !new_labels.is_empty() {
            labels.resize(start, String::new());
            labels.extend(new_labels.iter().cloned());
        }
        return;
    }

    if is_insert {
        let inserted = (0..count).map(|i| new_labels.get(i).cloned().unwrap_or_default());
        labels.splice(start..start, inserted);
        return;
    }

    for (offset, index) in (start..start + count).enumerate() {
        let replacement = new_labels.get(offset);
        if index >= labels.len() {
            match replacement {
                Some(label) => labels.push(label.clone()),
                None => break,
            }
        } else {
            labels[index] = replacement.cloned().unwrap_or_default();
        }
    }
}

/// Merges category labels of several series, first writer wins per index.
pub(crate) fn merge_category_labels<'a, I>(sources: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a [String]>,
{
    let mut merged: Vec<String> = Vec::new();
    for labels in sources {
        for (index, label) in labels.iter().enumerate() {
            if index >= merged.len() {
                merged.resize(index + 1, String::new());
            }
            if merged[index].is_empty() && !label.is_empty() {
                merged[index] = label.clone();
            }
        }
    }
    merged
}
