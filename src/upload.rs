//! Optional hand-off of written exports to S3.

use anyhow::{Context, Result};
use aws_sdk_s3::primitives::ByteStream;
use flate2::Compression;
use flate2::write::GzEncoder;
use std::io::Write;
use std::path::Path;
use tracing::info;

const XLSX_CONTENT_TYPE: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// Gzip-compresses `data` at the default level.
pub fn gzip_bytes(data: &[u8]) -> Result<Vec<u8>> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data)?;
    Ok(encoder.finish()?)
}

/// Object key and content type for an export file under `prefix`.
pub fn object_key(prefix: &str, file_name: &str, gzip: bool) -> (String, &'static str) {
    let prefix = prefix.trim_matches('/');
    let key = if prefix.is_empty() {
        file_name.to_string()
    } else {
        format!("{prefix}/{file_name}")
    };

    if gzip {
        (format!("{key}.gz"), "application/gzip")
    } else if file_name.ends_with(".xlsx") {
        (key, XLSX_CONTENT_TYPE)
    } else {
        (key, "text/csv")
    }
}

/// Uploads a written export file, optionally gzip-compressing it first.
///
/// Returns the object key it was stored under.
#[tracing::instrument(skip(client, path), fields(path = %path.display()))]
pub async fn upload_export(
    client: &aws_sdk_s3::Client,
    bucket: &str,
    prefix: &str,
    path: &Path,
    gzip: bool,
) -> Result<String> {
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .with_context(|| format!("export path has no file name: {}", path.display()))?;

    let contents = tokio::fs::read(path).await?;
    let body = if gzip { gzip_bytes(&contents)? } else { contents };
    let (key, content_type) = object_key(prefix, file_name, gzip);

    client
        .put_object()
        .bucket(bucket)
        .key(&key)
        .content_type(content_type)
        .body(ByteStream::from(body))
        .send()
        .await?;

    info!(bucket, key = %key, gzip, "Export uploaded to S3");
    Ok(key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::read::GzDecoder;
    use std::io::Read;

    #[test]
    fn test_gzip_round_trip() {
        let data = b"Serial Number,Customer\n1,Acme\n";
        let compressed = gzip_bytes(data).unwrap();

        let mut decoded = Vec::new();
        GzDecoder::new(compressed.as_slice())
            .read_to_end(&mut decoded)
            .unwrap();
        assert_eq!(decoded, data);
    }

    #[test]
    fn test_object_key_plain() {
        assert_eq!(
            object_key("routes/", "PM_Route_FARGO_2024-05-01.csv", false),
            ("routes/PM_Route_FARGO_2024-05-01.csv".to_string(), "text/csv")
        );
        assert_eq!(
            object_key("", "PM_Route_FARGO_2024-05-01.xlsx", false),
            ("PM_Route_FARGO_2024-05-01.xlsx".to_string(), XLSX_CONTENT_TYPE)
        );
    }

    #[test]
    fn test_object_key_gzip() {
        let (key, content_type) = object_key("routes", "PM_Route_FARGO_2024-05-01.csv", true);
        assert_eq!(key, "routes/PM_Route_FARGO_2024-05-01.csv.gz");
        assert_eq!(content_type, "application/gzip");
    }
}
