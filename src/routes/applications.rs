use axum::{
    extract::{multipart::Field, Multipart, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;

use crate::{
    dto::application_dto::{ApplyQuery, SubmitApplicationResponse},
    error::{Error, Result},
    models::draft::{ApplicationDraft, FileAttachment, VisaStatus},
    reference::openings::find_opening,
    services::form_service::FormController,
    utils::files::content_type_for,
    AppState,
};

async fn read_attachment(field: Field<'_>) -> Result<Option<FileAttachment>> {
    let file_name = field
        .file_name()
        .map(str::to_string)
        .unwrap_or_else(|| "upload.bin".to_string());
    let declared = field.content_type().map(str::to_string);
    let data = field.bytes().await.map_err(|e| {
        tracing::error!("Failed to read uploaded file {}: {}", file_name, e);
        Error::BadRequest("Failed to read file upload".into())
    })?;

    // Browsers send an empty part for a file input left blank.
    if data.is_empty() {
        return Ok(None);
    }

    let content_type = content_type_for(&file_name, declared.as_deref());
    Ok(Some(FileAttachment::new(file_name, content_type, data)))
}

fn apply_text(draft: &mut ApplicationDraft, name: &str, value: String) -> Result<()> {
    match name {
        "full_name" => draft.full_name = value,
        "email" => draft.email = value,
        "phone" => draft.phone = value,
        "nationality" => draft.nationality = value.trim().to_ascii_uppercase(),
        "position" => {
            if !value.trim().is_empty() {
                draft.position = value;
            }
        }
        "experience" => draft.experience = value,
        "education" => draft.education = value,
        "passport_number" => draft.passport_number = value,
        "visa_status" => {
            draft.visa_status = if value.trim().is_empty() {
                None
            } else {
                Some(value.parse::<VisaStatus>().map_err(Error::BadRequest)?)
            };
        }
        "cover_letter" => draft.cover_letter = value,
        other => tracing::debug!(field = other, "Ignoring unknown form field"),
    }
    Ok(())
}

#[utoipa::path(
    post,
    path = "/api/applications",
    params(
        ("job" = Option<String>, Query, description = "Title of the opening to pre-select")
    ),
    responses(
        (status = 201, description = "Application submitted", body = SubmitApplicationResponse),
        (status = 400, description = "Malformed form data"),
        (status = 404, description = "Unknown job opening"),
        (status = 422, description = "Form has invalid fields"),
        (status = 502, description = "Record store rejected the submission")
    )
)]
#[tracing::instrument(skip_all, fields(submission_id = %Uuid::new_v4()))]
pub async fn submit_application(
    State(state): State<AppState>,
    Query(query): Query<ApplyQuery>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse> {
    let form = FormController::new(state.submission_service.clone(), state.config.form_variant);

    if let Some(title) = query.job.as_deref().map(str::trim).filter(|t| !t.is_empty()) {
        let opening = find_opening(title)
            .ok_or_else(|| Error::NotFound(format!("No current opening titled '{}'", title)))?;
        form.select_job(opening.title);
    }

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "resume" => {
                let file = read_attachment(field).await?;
                form.update(|d| d.resume = file);
            }
            "cover_letter_file" => {
                let file = read_attachment(field).await?;
                form.update(|d| d.cover_letter_file = file);
            }
            _ => {
                let value = field.text().await?;
                form.update(|d| apply_text(d, &name, value))?;
            }
        }
    }

    let errors = form.validate();
    if !errors.is_empty() {
        tracing::info!(fields = %errors, "Application form rejected");
        return Err(Error::Validation(errors));
    }

    let submitted = form.submit().await?;
    Ok((
        StatusCode::CREATED,
        Json(SubmitApplicationResponse::from(submitted)),
    ))
}
