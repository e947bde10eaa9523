//! The fetch → normalize → write pipeline.

use std::str::FromStr;

use anyhow::Result;
use chrono_tz::Tz;
use tracing::{debug, info};

use firecal_core::error::ExportError;
use firecal_core::ics::ExportCalendar;
use firecal_core::normalize::normalize;
use firecal_firestore::document::record_from_fields;
use firecal_firestore::{FirestoreClient, ServiceAccountKey, TypeFilter};

use crate::Cli;

/// Run one export end to end and return the number of events written.
pub async fn run(cli: &Cli) -> Result<usize> {
    let tz = Tz::from_str(&cli.tz).map_err(|_| ExportError::UnknownTimezone(cli.tz.clone()))?;

    let filter = TypeFilter::new(cli.where_field.as_str(), cli.where_op.into(), cli.types.clone())?;

    let key = ServiceAccountKey::load(cli.credentials.as_deref())?;
    let client = FirestoreClient::connect(cli.project.clone(), &key).await?;

    let documents = client
        .run_query(&cli.collection, &filter, cli.order_by.as_deref())
        .await?;
    info!(
        count = documents.len(),
        collection = %cli.collection,
        "fetched matching documents"
    );

    let mut calendar = ExportCalendar::new();
    for fields in &documents {
        let record = record_from_fields(fields)?;
        match normalize(&record, tz)? {
            Some(event) => calendar.push(&event),
            None => debug!("skipping record without start time"),
        }
    }

    let count = calendar.write_to(&cli.output)?;
    Ok(count)
}
