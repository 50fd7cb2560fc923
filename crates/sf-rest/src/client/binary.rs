use std::path::{Path, PathBuf};

use tracing::{debug, instrument};

use forcelink_client::utils::random_string;

use crate::error::{Error, ErrorKind, Result};

const DEFAULT_IMAGE_EXTENSION: &str = "jpeg";

impl super::SalesforceRestClient {
    /// Download an image and write it to disk.
    ///
    /// `image_url` may be absolute or instance-relative (such as a rich-text
    /// `/servlet/rtaImage?...` link). Only images on the instance itself are
    /// fetched with the session token. The file lands in `dir` (default: the
    /// current directory) as `file_name`, or as a random `image_XXXXXXXXXX.jpeg`
    /// name when none is given. Returns the written path.
    #[instrument(skip(self))]
    pub async fn download_image(
        &self,
        image_url: &str,
        dir: Option<&Path>,
        file_name: Option<&str>,
    ) -> Result<PathBuf> {
        if image_url.trim().is_empty() {
            return Err(Error::new(ErrorKind::MissingRequiredData(
                "an image URL is required to download an image".to_string(),
            )));
        }

        let file_name = match file_name.filter(|name| !name.is_empty()) {
            Some(name) => name.to_string(),
            None => format!("{}.{}", random_string(10, "image_"), DEFAULT_IMAGE_EXTENSION),
        };
        let target = dir.unwrap_or_else(|| Path::new(".")).join(file_name);

        let bytes = self.client.get_bytes(image_url).await?;
        tokio::fs::write(&target, &bytes).await?;
        debug!(path = %target.display(), size = bytes.len(), "image downloaded");
        Ok(target)
    }
}
