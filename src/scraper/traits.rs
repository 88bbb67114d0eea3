use crate::model::ScraperError;

pub trait Scraper {
    fn fetch(&self, url: &str) -> Result<String, ScraperError>;
}
