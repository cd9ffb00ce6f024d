use reqwest::Client;

use crate::config::Settings;
use crate::notify::{MenuNotifier, Notification, Notifier};
use crate::parse::ParseOptions;
use crate::pipeline::process_document;
use crate::source::{build_client, download_pdf, extract_text, fetch_menu_names};
use crate::store::MenuStore;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub processed: Vec<String>,
    pub failed: Vec<String>,
}

/// Download new menus (or pick up local PDFs), then extract, clean, format
/// and announce each one. A failing document is logged and skipped.
pub async fn run(settings: &Settings) -> anyhow::Result<RunSummary> {
    let store = MenuStore::new(&settings.doc_dir);
    store.prepare(settings.clear)?;

    let mut summary = RunSummary::default();
    let client = build_client()?;
    let names = if settings.download {
        download_new(&client, &store, &settings.site_url, &mut summary.failed).await?
    } else {
        store.pdf_names()?
    };
    tracing::info!(count = names.len(), "menus to process");

    let notifier = MenuNotifier::from_settings(&settings.notify, client);
    let options = settings.parse_options();

    for name in names {
        match process_pdf(&store, &name, options, &notifier, &settings.notify.subject_prefix).await {
            Ok(()) => summary.processed.push(name),
            Err(err) => {
                tracing::error!(name = %name, error = %err, "failed to process menu");
                summary.failed.push(name);
            }
        }
    }
    Ok(summary)
}

/// Menus listed on the site that were not on disk yet and are now saved.
/// Names whose download or save fails go to `failed`.
async fn download_new(
    client: &Client,
    store: &MenuStore,
    site_url: &str,
    failed: &mut Vec<String>,
) -> anyhow::Result<Vec<String>> {
    let names: Vec<String> = fetch_menu_names(client, site_url)
        .await?
        .into_iter()
        .filter(|name| !store.has_pdf(name))
        .collect();

    let mut saved = Vec::with_capacity(names.len());
    for name in names {
        match save_download(client, store, site_url, &name).await {
            Ok(()) => saved.push(name),
            Err(err) => {
                tracing::error!(name = %name, error = %err, "failed to download menu");
                failed.push(name);
            }
        }
    }
    Ok(saved)
}

async fn save_download(
    client: &Client,
    store: &MenuStore,
    site_url: &str,
    name: &str,
) -> anyhow::Result<()> {
    let bytes = download_pdf(client, site_url, name).await?;
    store.save_pdf(name, &bytes)?;
    Ok(())
}

async fn process_pdf<N: Notifier>(
    store: &MenuStore,
    name: &str,
    options: ParseOptions,
    notifier: &N,
    subject_prefix: &str,
) -> anyhow::Result<()> {
    store.remove_outputs(name)?;

    let bytes = store.read_pdf(name)?;
    let raw = extract_text(&bytes)?;
    store.write_dirty(name, &raw)?;

    let menu = process_document(name, &raw, options);
    store.write_clean(name, &menu.clean_text)?;
    store.write_blog(name, &menu.formatted)?;
    tracing::info!(name, path = %store.blog_path(name).display(), "wrote formatted menu");

    let notification = Notification::for_menu(subject_prefix, name, &menu.formatted);
    notifier.notify(&notification).await
}
