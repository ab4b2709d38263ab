use actix_multipart::form::{tempfile::TempFile, MultipartForm};

/// Multipart upload carrying one payment or KYC report file.
#[derive(MultipartForm)]
pub struct UploadReportForm {
    #[multipart(limit = "10MB")]
    pub file: TempFile,
}

impl UploadReportForm {
    /// Original file name and raw bytes of the uploaded report.
    pub fn read(&self) -> std::io::Result<(Option<String>, Vec<u8>)> {
        let bytes = std::fs::read(self.file.file.path())?;
        Ok((self.file.file_name.clone(), bytes))
    }
}
