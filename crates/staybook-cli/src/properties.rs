//! # Properties Subcommand
//!
//! The landlord's own listings: list, create with pictures, delete.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Args, Subcommand};
use staybook_client::category::CategoryName;
use staybook_client::landlord::PictureUpload;
use staybook_client::listing::{CountVo, Description, ListingInfo, PriceVo, TextVo};
use staybook_state::views::{PropertiesCreateView, PropertiesView};
use staybook_state::App;
use uuid::Uuid;

use crate::bookings::LANDLORD_AUTHORITY;
use crate::console::{card_line, exit_code};
use crate::listings::parse_category;

/// Arguments for the `staybook properties` subcommand.
#[derive(Args, Debug)]
pub struct PropertiesArgs {
    #[command(subcommand)]
    pub command: PropertiesCommand,
}

#[derive(Subcommand, Debug)]
pub enum PropertiesCommand {
    /// List the signed-in landlord's listings.
    List,

    /// Publish a new listing. Any signed-in user may become a landlord.
    Create {
        #[arg(long, value_parser = parse_category)]
        category: CategoryName,
        #[arg(long)]
        location: String,
        #[arg(long)]
        title: String,
        #[arg(long)]
        description: String,
        /// Price per night.
        #[arg(long)]
        price: u32,
        #[arg(long, default_value_t = 1)]
        guests: u32,
        #[arg(long, default_value_t = 1)]
        bedrooms: u32,
        #[arg(long, default_value_t = 1)]
        beds: u32,
        #[arg(long, default_value_t = 1)]
        baths: u32,
        /// Picture files, in display order.
        #[arg(long = "picture", required = true)]
        pictures: Vec<PathBuf>,
    },

    /// Delete one of the landlord's listings.
    Delete {
        /// Listing public id.
        id: Uuid,
    },
}

/// Execute the properties subcommand.
pub async fn run_properties(args: &PropertiesArgs, app: &App) -> Result<u8> {
    match &args.command {
        PropertiesCommand::List => cmd_list(app).await,
        PropertiesCommand::Delete { id } => cmd_delete(app, *id).await,
        PropertiesCommand::Create {
            category,
            location,
            title,
            description,
            price,
            guests,
            bedrooms,
            beds,
            baths,
            pictures,
        } => {
            let uploads = pictures
                .iter()
                .map(|path| load_picture(path))
                .collect::<Result<Vec<_>>>()?;
            let view = PropertiesCreateView::new(app);
            view.edit(|listing| {
                listing.category = *category;
                listing.location = location.clone();
                listing.description = Description {
                    title: TextVo { value: title.clone() },
                    description: TextVo {
                        value: description.clone(),
                    },
                };
                listing.price = PriceVo { value: *price };
                listing.infos = ListingInfo {
                    guests: CountVo { value: *guests },
                    bedrooms: CountVo { value: *bedrooms },
                    beds: CountVo { value: *beds },
                    baths: CountVo { value: *baths },
                };
                listing.pictures = uploads;
            });
            cmd_create(app, view).await
        }
    }
}

async fn cmd_list(app: &App) -> Result<u8> {
    if !app.auth.authority_route_access(&[LANDLORD_AUTHORITY]).await {
        return Ok(1);
    }
    let view = PropertiesView::new(app);
    view.fetch().await?;

    let listings = view.state().listings;
    if listings.is_empty() {
        println!("No property yet.");
    }
    for card in &listings {
        println!("{}", card_line(card));
    }
    Ok(exit_code(&app.landlord.all_state().read()))
}

async fn cmd_create(app: &App, view: PropertiesCreateView) -> Result<u8> {
    let required: [&str; 0] = [];
    if !app.auth.authority_route_access(&required).await {
        return Ok(1);
    }
    // The view watches the user container too, so load it before creating.
    app.auth.fetch(false).await;
    view.create().await?;
    // Let the post-creation user resync finish.
    for _ in 0..8 {
        tokio::task::yield_now().await;
    }

    match view.state().closed_with {
        Some(public_id) => {
            println!("Created listing {public_id}");
            Ok(0)
        }
        None => Ok(1),
    }
}

async fn cmd_delete(app: &App, public_id: Uuid) -> Result<u8> {
    if !app.auth.authority_route_access(&[LANDLORD_AUTHORITY]).await {
        return Ok(1);
    }
    let view = PropertiesView::new(app);
    view.fetch().await?;
    let Some(handle) = view.delete(public_id) else {
        bail!("listing {public_id} is not one of your properties");
    };
    handle.await?;
    Ok(exit_code(&app.landlord.delete_state().read()))
}

/// Read a picture from disk, guessing its content type from the extension.
pub fn load_picture(path: &Path) -> Result<PictureUpload> {
    let bytes =
        std::fs::read(path).with_context(|| format!("failed to read picture {}", path.display()))?;
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "picture".to_string());
    Ok(PictureUpload {
        file_name,
        content_type: content_type_for(path).to_string(),
        bytes,
    })
}

fn content_type_for(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "webp" => "image/webp",
        "gif" => "image/gif",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn picture_is_loaded_with_its_content_type() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("front.JPG");
        std::fs::write(&path, b"\xff\xd8\xff").unwrap();

        let picture = load_picture(&path).unwrap();
        assert_eq!(picture.file_name, "front.JPG");
        assert_eq!(picture.content_type, "image/jpeg");
        assert_eq!(picture.bytes, b"\xff\xd8\xff");
    }

    #[test]
    fn unknown_extension_is_octet_stream() {
        assert_eq!(content_type_for(Path::new("plan.pdf")), "application/octet-stream");
        assert_eq!(content_type_for(Path::new("noext")), "application/octet-stream");
    }

    #[test]
    fn missing_picture_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_picture(&dir.path().join("missing.png")).unwrap_err();
        assert!(err.to_string().contains("missing.png"));
    }
}
