use crate::types::{
    AccuracyReport, ClassificationRecord, Label, RecordPage, DEFAULT_PAGE_SIZE,
};

/// Tallies labels and computes accuracy over the reference length.
///
/// `reference_len` is the length of the reference sequence, not the number of
/// records: `Extra` records never count towards the denominator.
pub fn aggregate(reference_len: usize, records: Vec<ClassificationRecord>) -> AccuracyReport {
    let mut correct_count = 0;
    let mut missing_count = 0;
    let mut wrong_count = 0;
    let mut extra_count = 0;
    for record in &records {
        match record.label {
            Label::Correct => correct_count += 1,
            Label::Missing => missing_count += 1,
            Label::Wrong => wrong_count += 1,
            Label::Extra => extra_count += 1,
        }
    }

    let accuracy_percentage = if reference_len > 0 {
        correct_count as f64 / reference_len as f64 * 100.0
    } else {
        0.0
    };

    AccuracyReport {
        total_reference_units: reference_len,
        correct_count,
        missing_count,
        wrong_count,
        extra_count,
        accuracy_percentage,
        records,
        page_size: DEFAULT_PAGE_SIZE,
    }
}

impl AccuracyReport {
    /// Sets the page size served by `page(n, 0)`. Zero keeps the default.
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        if page_size > 0 {
            self.page_size = page_size;
        }
        self
    }

    /// One page of records ordered by reference index.
    ///
    /// Pages are 1-based. Page 0 serves the first page and a page past the end
    /// serves the last one. An empty report still has one (empty) page. A
    /// zero `page_size` falls back to the report's own page size, which is
    /// the configured [`GradeConfig::page_size`](crate::GradeConfig) for
    /// reports built by a [`Grader`](crate::Grader).
    pub fn page(&self, page_number: usize, page_size: usize) -> RecordPage<'_> {
        let page_size = match (page_size, self.page_size) {
            (0, 0) => DEFAULT_PAGE_SIZE,
            (0, own) => own,
            (requested, _) => requested,
        };

        let mut ordered: Vec<&ClassificationRecord> = self.records.iter().collect();
        ordered.sort_by_key(|record| record.reference_index);

        let total_records = ordered.len();
        let num_pages = total_records.div_ceil(page_size).max(1);
        let number = page_number.clamp(1, num_pages);
        let start = (number - 1) * page_size;
        let end = (start + page_size).min(total_records);

        RecordPage {
            number,
            num_pages,
            page_size,
            total_records,
            records: ordered[start..end].to_vec(),
        }
    }

    /// Reference words in alignment order, joined with single spaces.
    pub fn reference_text(&self) -> String {
        join_units(self.records.iter().filter_map(|r| r.reference_unit.as_deref()))
    }

    /// Candidate words in alignment order, joined with single spaces.
    pub fn candidate_text(&self) -> String {
        join_units(self.records.iter().filter_map(|r| r.candidate_unit.as_deref()))
    }
}

fn join_units<'a>(units: impl Iterator<Item = &'a str>) -> String {
    units.collect::<Vec<_>>().join(" ")
}
