use std::path::PathBuf;
use std::sync::Arc;

use log::{debug, info, warn};

use crate::cards::card_id::CardId;
use crate::cards::runner_card::RunnerCard;
use crate::catalog::set_name_for;
use crate::content_fetcher::ContentFetcher;
use crate::error::CacheError;
use crate::utilities::constants::{CARD_FILE_EXTENSION, IMAGES_DIR, IMAGE_FILE_EXTENSION};
use crate::utilities::file_management::{
    ensure_dir, load_from_json_file, path_exists, save_to_json_file, write_atomically,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageOutcome {
    Downloaded,
    AlreadyPresent,
    /// The card record has no large image to download.
    NoImageSource,
}

/// On-disk card cache laid out as `<root>/<set>/<NNN>.card` with the artwork
/// in `<root>/<set>/images/<NNN>.png`.
///
/// A card counts as retrieved as soon as its `.card` file exists.
pub struct CardCache {
    root: PathBuf,
    fetcher: Arc<dyn ContentFetcher>,
    image_base_url: String,
}

impl CardCache {
    pub fn new(root: PathBuf, fetcher: Arc<dyn ContentFetcher>, image_base_url: &str) -> Self {
        CardCache {
            root,
            fetcher,
            image_base_url: image_base_url.trim_end_matches('/').to_string(),
        }
    }

    fn set_dir(&self, set_name: &str) -> PathBuf {
        self.root.join(set_name)
    }

    fn images_dir(&self, set_name: &str) -> PathBuf {
        self.set_dir(set_name).join(IMAGES_DIR)
    }

    pub fn card_path(&self, set_name: &str, card_id: &CardId) -> PathBuf {
        self.set_dir(set_name)
            .join(format!("{}.{}", card_id.file_stem(), CARD_FILE_EXTENSION))
    }

    pub fn image_path(&self, set_name: &str, card_id: &CardId) -> PathBuf {
        self.images_dir(set_name)
            .join(format!("{}.{}", card_id.file_stem(), IMAGE_FILE_EXTENSION))
    }

    pub fn exists(&self, set_name: &str, card_id: &CardId) -> Result<bool, CacheError> {
        path_exists(&self.card_path(set_name, card_id))
    }

    pub fn image_exists(&self, set_name: &str, card_id: &CardId) -> Result<bool, CacheError> {
        path_exists(&self.image_path(set_name, card_id))
    }

    pub fn load(&self, set_name: &str, card_id: &CardId) -> Result<RunnerCard, CacheError> {
        load_from_json_file(&self.card_path(set_name, card_id))
    }

    /// Writes the card record, then downloads its large image unless an image
    /// is already cached for it.
    pub async fn persist(&self, card: &RunnerCard) -> Result<ImageOutcome, CacheError> {
        let card_id: CardId = card.code.parse()?;
        let set_name = set_name_for(&card_id)?;

        ensure_dir(&self.set_dir(set_name))?;
        save_to_json_file(&self.card_path(set_name, &card_id), card)?;

        self.store_image(card, set_name, &card_id).await
    }

    /// Fetches the artwork of a card whose record is cached but whose image
    /// is not. No card API call is made.
    pub async fn repair_image(
        &self,
        set_name: &str,
        card_id: &CardId,
    ) -> Result<ImageOutcome, CacheError> {
        let card = self.load(set_name, card_id)?;
        self.store_image(&card, set_name, card_id).await
    }

    async fn store_image(
        &self,
        card: &RunnerCard,
        set_name: &str,
        card_id: &CardId,
    ) -> Result<ImageOutcome, CacheError> {
        ensure_dir(&self.images_dir(set_name))?;

        let image_path = self.image_path(set_name, card_id);
        if path_exists(&image_path)? {
            debug!("Image for {} already created", card_id);
            return Ok(ImageOutcome::AlreadyPresent);
        }

        if card.large_image_src.is_empty() {
            warn!("Card {} has no large image to download", card_id);
            return Ok(ImageOutcome::NoImageSource);
        }

        let url = self.image_url(&card.large_image_src);
        let image = self
            .fetcher
            .fetch(&url)
            .await
            .map_err(|source| CacheError::ImageDownload {
                card_id: *card_id,
                source,
            })?;
        write_atomically(&image_path, &image)?;

        info!("New image created for {} at {}", card_id, image_path.display());
        Ok(ImageOutcome::Downloaded)
    }

    fn image_url(&self, image_src: &str) -> String {
        if image_src.starts_with("http://") || image_src.starts_with("https://") {
            image_src.to_string()
        } else {
            format!("{}{}", self.image_base_url, image_src)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content_fetcher::MockContentFetcher;
    use crate::error::{CatalogError, FetchError};
    use crate::test::helpers::{noise_runner_card, runner_card, FAKE_PNG};
    use std::fs;
    use tempfile::{tempdir, TempDir};

    struct TestContext {
        temp_dir: TempDir,
        cache: CardCache,
    }

    impl TestContext {
        fn new(fetcher: MockContentFetcher) -> Self {
            let _ = env_logger::builder().is_test(true).try_init();
            let temp_dir = tempdir().unwrap();
            let cache = CardCache::new(
                temp_dir.path().to_path_buf(),
                Arc::new(fetcher),
                "http://netrunnerdb.com/",
            );
            TestContext { temp_dir, cache }
        }
    }

    fn fetcher_expecting_images(times: usize) -> MockContentFetcher {
        let mut fetcher = MockContentFetcher::new();
        fetcher
            .expect_fetch()
            .times(times)
            .returning(|_| Ok(FAKE_PNG.to_vec()));
        fetcher
    }

    fn core_001() -> CardId {
        "01001".parse().unwrap()
    }

    #[test]
    fn test_paths_follow_set_and_card_number() {
        let ctx = TestContext::new(MockContentFetcher::new());
        let root = ctx.temp_dir.path();
        assert_eq!(
            ctx.cache.card_path("core", &core_001()),
            root.join("core").join("001.card")
        );
        assert_eq!(
            ctx.cache.image_path("core", &core_001()),
            root.join("core").join("images").join("001.png")
        );
    }

    #[tokio::test]
    async fn test_persist_writes_record_and_image() {
        let mut fetcher = MockContentFetcher::new();
        fetcher
            .expect_fetch()
            .withf(|url: &str| {
                url == "http://netrunnerdb.com/bundles/netrunnerdbcards/images/cards/en-large/01001.png"
            })
            .times(1)
            .returning(|_| Ok(FAKE_PNG.to_vec()));
        let ctx = TestContext::new(fetcher);

        assert!(!ctx.cache.exists("core", &core_001()).unwrap());
        let outcome = ctx.cache.persist(&noise_runner_card()).await.unwrap();

        assert_eq!(outcome, ImageOutcome::Downloaded);
        assert!(ctx.cache.exists("core", &core_001()).unwrap());
        assert_eq!(ctx.cache.load("core", &core_001()).unwrap(), noise_runner_card());
        assert_eq!(
            fs::read(ctx.cache.image_path("core", &core_001())).unwrap(),
            FAKE_PNG
        );
    }

    #[tokio::test]
    async fn test_existing_image_is_not_downloaded_again() {
        let ctx = TestContext::new(fetcher_expecting_images(1));
        let card = noise_runner_card();

        assert_eq!(ctx.cache.persist(&card).await.unwrap(), ImageOutcome::Downloaded);
        // The mock panics on a second fetch.
        assert_eq!(
            ctx.cache.persist(&card).await.unwrap(),
            ImageOutcome::AlreadyPresent
        );
    }

    #[tokio::test]
    async fn test_persist_overwrites_previous_record() {
        let ctx = TestContext::new(fetcher_expecting_images(1));
        let card_path = ctx.cache.card_path("core", &core_001());
        fs::create_dir_all(card_path.parent().unwrap()).unwrap();
        fs::write(&card_path, "{\"code\": \"010").unwrap();

        ctx.cache.persist(&noise_runner_card()).await.unwrap();

        assert_eq!(ctx.cache.load("core", &core_001()).unwrap(), noise_runner_card());
    }

    #[tokio::test]
    async fn test_unknown_set_code_is_rejected_before_writing() {
        let ctx = TestContext::new(MockContentFetcher::new());
        let card = runner_card("99001", "Nowhere");

        let result = ctx.cache.persist(&card).await;

        assert!(matches!(
            result,
            Err(CacheError::Catalog(CatalogError::UnknownSetCode(99)))
        ));
        assert_eq!(fs::read_dir(ctx.temp_dir.path()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn test_failed_image_download_keeps_record() {
        let mut fetcher = MockContentFetcher::new();
        fetcher.expect_fetch().times(1).returning(|url| {
            Err(FetchError::HttpStatus {
                url: url.to_string(),
                status: 503,
            })
        });
        let ctx = TestContext::new(fetcher);

        let result = ctx.cache.persist(&noise_runner_card()).await;

        assert!(matches!(result, Err(CacheError::ImageDownload { .. })));
        assert!(ctx.cache.exists("core", &core_001()).unwrap());
        assert!(!ctx.cache.image_exists("core", &core_001()).unwrap());
    }

    #[tokio::test]
    async fn test_repair_image_uses_cached_record() {
        let ctx = TestContext::new(fetcher_expecting_images(1));
        let card_path = ctx.cache.card_path("core", &core_001());
        fs::create_dir_all(card_path.parent().unwrap()).unwrap();
        fs::write(&card_path, serde_json::to_string(&noise_runner_card()).unwrap()).unwrap();

        let outcome = ctx.cache.repair_image("core", &core_001()).await.unwrap();

        assert_eq!(outcome, ImageOutcome::Downloaded);
        assert!(ctx.cache.image_exists("core", &core_001()).unwrap());
    }

    #[tokio::test]
    async fn test_card_without_image_source() {
        let ctx = TestContext::new(MockContentFetcher::new());
        let mut card = runner_card("01002", "Déjà Vu");
        card.large_image_src.clear();

        let outcome = ctx.cache.persist(&card).await.unwrap();

        assert_eq!(outcome, ImageOutcome::NoImageSource);
        assert!(ctx.cache.exists("core", &"01002".parse().unwrap()).unwrap());
    }

    #[test]
    fn test_absolute_image_urls_are_used_as_is() {
        let ctx = TestContext::new(MockContentFetcher::new());
        assert_eq!(
            ctx.cache.image_url("https://cdn.example.com/01001.png"),
            "https://cdn.example.com/01001.png"
        );
        assert_eq!(
            ctx.cache.image_url("/images/01001.png"),
            "http://netrunnerdb.com/images/01001.png"
        );
    }
}
