use crate::domain::model::{UploadFile, UploadPair};
use crate::utils::error::Result;

/// Screen a dropped batch: non-CSV entries are filtered out the way a
/// dropzone accept filter would never admit them, then the remainder must be
/// exactly two files. First file becomes transactions, second customers, in
/// drop order.
pub fn screen_batch(batch: Vec<UploadFile>) -> Result<UploadPair> {
    let accepted: Vec<UploadFile> = batch.into_iter().filter(UploadFile::is_csv).collect();
    UploadPair::try_from_batch(accepted).inspect_err(|e| {
        tracing::warn!("Discarding upload batch: {}", e);
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::DashboardError;

    fn csv(name: &str) -> UploadFile {
        UploadFile::new(name, format!("{} contents", name).into_bytes())
    }

    #[test]
    fn test_two_csv_files_become_a_pair_in_drop_order() {
        let pair = screen_batch(vec![csv("transactions.csv"), csv("customers.csv")]).unwrap();
        assert_eq!(pair.transactions.name, "transactions.csv");
        assert_eq!(pair.customers.name, "customers.csv");
    }

    #[test]
    fn test_single_file_is_rejected() {
        let err = screen_batch(vec![csv("transactions.csv")]).unwrap_err();
        assert!(matches!(
            err,
            DashboardError::InvalidUploadCount { actual: 1 }
        ));
    }

    #[test]
    fn test_three_files_are_rejected() {
        let err = screen_batch(vec![csv("a.csv"), csv("b.csv"), csv("c.csv")]).unwrap_err();
        assert!(matches!(
            err,
            DashboardError::InvalidUploadCount { actual: 3 }
        ));
    }

    #[test]
    fn test_empty_batch_is_rejected() {
        let err = screen_batch(vec![]).unwrap_err();
        assert!(matches!(
            err,
            DashboardError::InvalidUploadCount { actual: 0 }
        ));
    }

    #[test]
    fn test_non_csv_files_never_enter_the_batch() {
        // A stray .txt is filtered before the count check, matching the
        // dropzone accept filter.
        let pair = screen_batch(vec![
            csv("transactions.csv"),
            UploadFile::new("notes.txt", b"junk".to_vec()),
            csv("customers.csv"),
        ])
        .unwrap();
        assert_eq!(pair.transactions.name, "transactions.csv");
        assert_eq!(pair.customers.name, "customers.csv");
    }

    #[test]
    fn test_declared_content_type_wins_over_extension() {
        let declared = UploadFile::new("export.dat", b"a,b\n1,2".to_vec())
            .with_content_type("text/csv");
        assert!(declared.is_csv());

        let mislabeled =
            UploadFile::new("data.csv", b"<html>".to_vec()).with_content_type("text/html");
        assert!(!mislabeled.is_csv());
    }
}
