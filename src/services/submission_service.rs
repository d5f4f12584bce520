use std::sync::Arc;
use tracing::{info, warn};

use crate::database::record_store::{RecordStore, StoreError};
use crate::models::application::{Application, NewApplication};
use crate::models::document::{Document, DocumentType};
use crate::models::draft::{ApplicationDraft, FileAttachment};
use crate::utils::files::{object_path, sanitize_file_name};

/// Outcome of a completed submission.
#[derive(Debug, Clone)]
pub struct SubmittedApplication {
    pub application: Application,
    pub documents: Vec<Document>,
}

/// The write sequence is not transactional. Any failure after the application
/// row exists leaves that row behind; its id is kept here for reconciliation.
#[derive(Debug, thiserror::Error)]
pub enum SubmissionError {
    #[error("failed to insert into `{table}`: {source}")]
    RecordInsert {
        table: &'static str,
        application_id: Option<String>,
        #[source]
        source: StoreError,
    },

    #[error("failed to upload `{path}`: {source}")]
    Upload {
        application_id: String,
        path: String,
        #[source]
        source: StoreError,
    },
}

impl SubmissionError {
    /// Id of an application row that was written before the failure.
    pub fn orphaned_application(&self) -> Option<&str> {
        match self {
            SubmissionError::RecordInsert { application_id, .. } => application_id.as_deref(),
            SubmissionError::Upload { application_id, .. } => Some(application_id),
        }
    }
}

#[derive(Clone)]
pub struct SubmissionService {
    store: Arc<dyn RecordStore>,
    bucket: String,
}

impl SubmissionService {
    pub fn new(store: Arc<dyn RecordStore>, bucket: impl Into<String>) -> Self {
        Self {
            store,
            bucket: bucket.into(),
        }
    }

    /// Creates the application row, then stores the resume and, when given,
    /// the cover-letter file. Stops at the first failing step.
    pub async fn submit(
        &self,
        draft: &ApplicationDraft,
        resume: &FileAttachment,
        cover_letter: Option<&FileAttachment>,
    ) -> Result<SubmittedApplication, SubmissionError> {
        let row = NewApplication::from_draft(draft);
        let application = self
            .store
            .insert_application(&row)
            .await
            .map_err(|source| SubmissionError::RecordInsert {
                table: NewApplication::TABLE,
                application_id: None,
                source,
            })?;
        info!(application_id = %application.id, position = %application.position, "Application created");

        let mut documents = Vec::with_capacity(2);
        documents.push(
            self.store_document(&application.id, DocumentType::Resume, resume)
                .await?,
        );

        if let Some(file) = cover_letter {
            documents.push(
                self.store_document(&application.id, DocumentType::CoverLetter, file)
                    .await?,
            );
        }

        Ok(SubmittedApplication {
            application,
            documents,
        })
    }

    async fn store_document(
        &self,
        application_id: &str,
        kind: DocumentType,
        file: &FileAttachment,
    ) -> Result<Document, SubmissionError> {
        let path = object_path(application_id, kind, &file.file_name);

        self.store
            .upload_object(&self.bucket, &path, file)
            .await
            .map_err(|source| {
                warn!(application_id, %kind, path = %path, "Upload failed, application row left in place");
                SubmissionError::Upload {
                    application_id: application_id.to_string(),
                    path: path.clone(),
                    source,
                }
            })?;

        let document = Document {
            application_id: application_id.to_string(),
            file_path: path,
            file_name: sanitize_file_name(&file.file_name),
            file_type: file.content_type.clone(),
            file_size: file.size() as i64,
            document_type: kind,
        };

        self.store
            .insert_document(&document)
            .await
            .map_err(|source| {
                warn!(
                    application_id,
                    path = %document.file_path,
                    "Document row rejected, stored object has no metadata"
                );
                SubmissionError::RecordInsert {
                    table: Document::TABLE,
                    application_id: Some(application_id.to_string()),
                    source,
                }
            })?;

        info!(application_id, %kind, path = %document.file_path, "Document stored");
        Ok(document)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::record_store::MockRecordStore;
    use crate::models::application::ApplicationStatus;
    use chrono::Utc;
    use mockall::{predicate::eq, Sequence};

    fn draft() -> ApplicationDraft {
        ApplicationDraft {
            full_name: "Ngozi Eze".into(),
            email: "ngozi@example.com".into(),
            phone: "+971501234567".into(),
            nationality: "NG".into(),
            position: "Administrative Officer".into(),
            experience: "5".into(),
            education: "MBA".into(),
            passport_number: "B1234567".into(),
            ..Default::default()
        }
    }

    fn stored(row: &NewApplication, id: &str) -> Application {
        row.clone().into_stored(id, Utc::now())
    }

    fn resume() -> FileAttachment {
        FileAttachment::new("cv.pdf", "application/pdf", &b"%PDF-1.4 resume"[..])
    }

    fn letter() -> FileAttachment {
        FileAttachment::new("letter.pdf", "application/pdf", &b"%PDF-1.4 letter"[..])
    }

    fn rejected() -> StoreError {
        StoreError::Rejected {
            status: 500,
            message: "boom".into(),
        }
    }

    #[tokio::test]
    async fn writes_application_then_resume() {
        let mut store = MockRecordStore::new();
        let mut seq = Sequence::new();

        store
            .expect_insert_application()
            .withf(|row| row.status == ApplicationStatus::Pending && row.full_name == "Ngozi Eze")
            .times(1)
            .in_sequence(&mut seq)
            .returning(|row| Ok(stored(row, "A1")));
        store
            .expect_upload_object()
            .withf(|bucket, path, file| {
                bucket == "applications" && path == "A1/resume/cv.pdf" && file.file_name == "cv.pdf"
            })
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _, _| Ok(()));
        store
            .expect_insert_document()
            .withf(|doc| {
                doc.application_id == "A1"
                    && doc.document_type == DocumentType::Resume
                    && doc.file_name == "cv.pdf"
                    && doc.file_path == "A1/resume/cv.pdf"
                    && doc.file_type == "application/pdf"
                    && doc.file_size == 15
            })
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(()));

        let service = SubmissionService::new(Arc::new(store), "applications");
        let result = service.submit(&draft(), &resume(), None).await.unwrap();

        assert_eq!(result.application.id, "A1");
        assert_eq!(result.application.status, ApplicationStatus::Pending);
        assert_eq!(result.documents.len(), 1);
    }

    #[tokio::test]
    async fn cover_letter_follows_resume() {
        let mut store = MockRecordStore::new();
        let mut seq = Sequence::new();

        store
            .expect_insert_application()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|row| Ok(stored(row, "A1")));
        store
            .expect_upload_object()
            .with(eq("applications"), eq("A1/resume/cv.pdf"), mockall::predicate::always())
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _, _| Ok(()));
        store
            .expect_insert_document()
            .withf(|doc| doc.document_type == DocumentType::Resume)
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(()));
        store
            .expect_upload_object()
            .with(
                eq("applications"),
                eq("A1/cover_letter/letter.pdf"),
                mockall::predicate::always(),
            )
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _, _| Ok(()));
        store
            .expect_insert_document()
            .withf(|doc| {
                doc.document_type == DocumentType::CoverLetter
                    && doc.file_path == "A1/cover_letter/letter.pdf"
            })
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(()));

        let service = SubmissionService::new(Arc::new(store), "applications");
        let result = service
            .submit(&draft(), &resume(), Some(&letter()))
            .await
            .unwrap();

        let kinds: Vec<_> = result.documents.iter().map(|d| d.document_type).collect();
        assert_eq!(kinds, vec![DocumentType::Resume, DocumentType::CoverLetter]);
    }

    #[tokio::test]
    async fn application_insert_failure_stops_everything() {
        let mut store = MockRecordStore::new();
        store
            .expect_insert_application()
            .times(1)
            .returning(|_| Err(rejected()));
        store.expect_upload_object().never();
        store.expect_insert_document().never();

        let service = SubmissionService::new(Arc::new(store), "applications");
        let err = service
            .submit(&draft(), &resume(), Some(&letter()))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            SubmissionError::RecordInsert { table: "applications", .. }
        ));
        assert_eq!(err.orphaned_application(), None);
    }

    #[tokio::test]
    async fn resume_upload_failure_skips_cover_letter_and_keeps_row() {
        let mut store = MockRecordStore::new();
        store
            .expect_insert_application()
            .times(1)
            .returning(|row| Ok(stored(row, "A1")));
        store
            .expect_upload_object()
            .times(1)
            .returning(|_, _, _| Err(rejected()));
        store.expect_insert_document().never();

        let service = SubmissionService::new(Arc::new(store), "applications");
        let err = service
            .submit(&draft(), &resume(), Some(&letter()))
            .await
            .unwrap_err();

        match &err {
            SubmissionError::Upload { path, .. } => assert_eq!(path, "A1/resume/cv.pdf"),
            other => panic!("unexpected error: {:?}", other),
        }
        assert_eq!(err.orphaned_application(), Some("A1"));
    }

    #[tokio::test]
    async fn document_insert_failure_is_reported() {
        let mut store = MockRecordStore::new();
        store
            .expect_insert_application()
            .returning(|row| Ok(stored(row, "A7")));
        store.expect_upload_object().times(1).returning(|_, _, _| Ok(()));
        store
            .expect_insert_document()
            .times(1)
            .returning(|_| Err(rejected()));

        let service = SubmissionService::new(Arc::new(store), "applications");
        let err = service.submit(&draft(), &resume(), None).await.unwrap_err();

        assert!(matches!(
            err,
            SubmissionError::RecordInsert { table: "documents", .. }
        ));
        assert_eq!(err.orphaned_application(), Some("A7"));
    }

    #[tokio::test]
    async fn uses_configured_bucket_and_sanitized_names() {
        let mut store = MockRecordStore::new();
        store
            .expect_insert_application()
            .returning(|row| Ok(stored(row, "A2")));
        store
            .expect_upload_object()
            .withf(|bucket, path, _| bucket == "careers" && path == "A2/resume/cv.pdf")
            .times(1)
            .returning(|_, _, _| Ok(()));
        store
            .expect_insert_document()
            .withf(|doc| doc.file_name == "cv.pdf")
            .returning(|_| Ok(()));

        let service = SubmissionService::new(Arc::new(store), "careers");
        let sneaky = FileAttachment::new("../../cv.pdf", "application/pdf", &b"%PDF"[..]);
        tokio_test::assert_ok!(service.submit(&draft(), &sneaky, None).await);
    }
}
