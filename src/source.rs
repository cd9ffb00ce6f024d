use reqwest::{Client, Url};
use scraper::{Html, Selector};

/// Links to the day menus live in the first column of the site's layout table.
const MENU_LINK_SELECTOR: &str = "#table2 td:first-child > p a";

pub fn build_client() -> anyhow::Result<Client> {
    let client = Client::builder()
        // Avoid macOS system proxy lookup that can panic in sandboxed contexts.
        .no_proxy()
        .user_agent("weswings-menu/0.1")
        .build()?;
    Ok(client)
}

pub async fn fetch_menu_names(client: &Client, site_url: &str) -> anyhow::Result<Vec<String>> {
    let resp = client
        .get(site_url)
        .send()
        .await?
        .error_for_status()?
        .text()
        .await?;
    menu_names_from_html(&resp)
}

/// Document identifiers are the menu link targets without their ".pdf".
pub fn menu_names_from_html(html: &str) -> anyhow::Result<Vec<String>> {
    let doc = Html::parse_document(html);
    let selector = Selector::parse(MENU_LINK_SELECTOR)
        .map_err(|e| anyhow::anyhow!("invalid menu link selector: {e:?}"))?;

    let mut names = Vec::new();
    for element in doc.select(&selector) {
        let Some(href) = element.value().attr("href") else {
            continue;
        };
        let href = href.trim();
        if href.is_empty() {
            continue;
        }
        let name = href.replacen(".pdf", "", 1);
        if !names.contains(&name) {
            names.push(name);
        }
    }
    Ok(names)
}

pub fn pdf_url(site_url: &str, name: &str) -> anyhow::Result<Url> {
    let base = Url::parse(site_url)?;
    Ok(base.join(&format!("/{name}.pdf"))?)
}

pub async fn download_pdf(client: &Client, site_url: &str, name: &str) -> anyhow::Result<Vec<u8>> {
    let url = pdf_url(site_url, name)?;
    tracing::info!(%url, "downloading menu PDF");
    let bytes = client
        .get(url)
        .send()
        .await?
        .error_for_status()?
        .bytes()
        .await?;
    Ok(bytes.to_vec())
}

pub fn extract_text(bytes: &[u8]) -> anyhow::Result<String> {
    let text = pdf_extract::extract_text_from_mem(bytes)?;
    Ok(text)
}
