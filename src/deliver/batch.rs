use uuid::Uuid;

/// Most delivery channels cap a batch put at 500 records per request;
/// per-record and per-request byte limits are the caller's concern.
pub const MAX_RECORDS_PER_BATCH: usize = 500;

/// A count-bounded group of records sent in one delivery call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Batch {
    /// Stable across retries of the same original batch (for log correlation)
    pub batch_id: Uuid,
    pub destination: String,
    pub records: Vec<String>,
}

impl Batch {
    pub fn new(destination: impl Into<String>, records: Vec<String>) -> Self {
        Self {
            batch_id: Uuid::new_v4(),
            destination: destination.into(),
            records,
        }
    }
}

/// Partition one destination's records into batches of at most
/// `max_per_batch` records.
///
/// Empty-string records are dropped outright. Every kept record gets a
/// trailing newline appended, since the channel stores payloads back to back
/// with no inter-record delimiter of its own. An empty (post-filter) record
/// list still yields one empty batch.
pub fn build_batches(destination: &str, records: &[String], max_per_batch: usize) -> Vec<Batch> {
    let mut batches = Vec::new();
    let mut current: Vec<String> = Vec::new();

    for record in records {
        if record.is_empty() {
            continue;
        }
        if current.len() >= max_per_batch {
            batches.push(Batch::new(destination, std::mem::take(&mut current)));
        }
        current.push(format!("{record}\n"));
    }

    batches.push(Batch::new(destination, current));
    batches
}

#[cfg(test)]
mod tests {
    use super::*;

    fn records(lines: &[&str]) -> Vec<String> {
        lines.iter().map(|l| l.to_string()).collect()
    }

    #[test]
    fn test_splits_at_max_per_batch() {
        let input = records(&["a", "b", "c", "d", "e"]);
        let batches = build_batches("dest", &input, 2);

        let sizes: Vec<usize> = batches.iter().map(|b| b.records.len()).collect();
        assert_eq!(sizes, vec![2, 2, 1]);

        // Order preserved across batch boundaries, separator appended.
        let flattened: Vec<&str> = batches
            .iter()
            .flat_map(|b| b.records.iter().map(String::as_str))
            .collect();
        assert_eq!(flattened, vec!["a\n", "b\n", "c\n", "d\n", "e\n"]);

        for batch in &batches {
            assert_eq!(batch.destination, "dest");
        }
    }

    #[test]
    fn test_exact_multiple_produces_no_trailing_empty_batch() {
        let input = records(&["a", "b", "c", "d"]);
        let batches = build_batches("dest", &input, 2);

        let sizes: Vec<usize> = batches.iter().map(|b| b.records.len()).collect();
        assert_eq!(sizes, vec![2, 2]);
    }

    #[test]
    fn test_empty_records_are_dropped() {
        let input = records(&["a", "", "b", "", ""]);
        let batches = build_batches("dest", &input, 2);

        assert_eq!(batches.len(), 1);
        assert_eq!(batches[0].records, vec!["a\n", "b\n"]);
    }

    #[test]
    fn test_empty_input_yields_one_empty_batch() {
        let batches = build_batches("dest", &[], 500);

        assert_eq!(batches.len(), 1);
        assert!(batches[0].records.is_empty());

        // All-empty input filters down to the same shape.
        let batches = build_batches("dest", &records(&["", ""]), 500);
        assert_eq!(batches.len(), 1);
        assert!(batches[0].records.is_empty());
    }

    #[test]
    fn test_each_batch_gets_a_distinct_id() {
        let input = records(&["a", "b", "c"]);
        let batches = build_batches("dest", &input, 1);

        assert_eq!(batches.len(), 3);
        assert_ne!(batches[0].batch_id, batches[1].batch_id);
        assert_ne!(batches[1].batch_id, batches[2].batch_id);
    }
}
