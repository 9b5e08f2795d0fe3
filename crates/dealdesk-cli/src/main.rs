//! dealdesk — command-line client for the dealdesk API.
//!
//! Talks to a running `dealdesk-server` and prints responses as pretty
//! JSON, so output can be piped straight into `jq`.

mod client;

use anyhow::Result;
use clap::{Parser, Subcommand};
use serde_json::{Map, Value, json};

use crate::client::{ApiClient, ApiConfig};

#[derive(Parser)]
#[command(author, version, about = "Dealdesk command-line client")]
struct Cli {
  /// Base URL of the dealdesk server.
  #[arg(long, default_value = "http://127.0.0.1:8080")]
  url: String,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand)]
enum Command {
  /// List deals, optionally filtered.
  List {
    /// Only deals with this status (active | inactive | archived).
    #[arg(long)]
    status: Option<String>,
    /// Only deals assigned to this user id.
    #[arg(long)]
    user:   Option<i64>,
  },
  /// Show a single deal.
  Show { id: i64 },
  /// Create a deal.
  Create {
    #[arg(long)]
    name:        String,
    #[arg(long, default_value = "")]
    description: String,
    /// active | inactive | archived; the server defaults to active.
    #[arg(long)]
    status:      Option<String>,
    /// Assignee user id.
    #[arg(long)]
    user:        i64,
    /// Monetary value, e.g. "1500.50".
    #[arg(long)]
    value:       String,
  },
  /// Update the supplied fields of a deal.
  Update {
    id: i64,
    #[arg(long)]
    name:        Option<String>,
    #[arg(long)]
    description: Option<String>,
    #[arg(long)]
    status:      Option<String>,
    #[arg(long)]
    user:        Option<i64>,
    #[arg(long)]
    value:       Option<String>,
  },
  /// Delete a deal.
  Delete { id: i64 },
}

#[tokio::main]
async fn main() -> Result<()> {
  let cli = Cli::parse();
  let client = ApiClient::new(ApiConfig { base_url: cli.url })?;

  match cli.command {
    Command::List { status, user } => {
      let deals = client.list_deals(status.as_deref(), user).await?;
      println!("{}", serde_json::to_string_pretty(&deals)?);
    }

    Command::Show { id } => {
      let deal = client.get_deal(id).await?;
      println!("{}", serde_json::to_string_pretty(&deal)?);
    }

    Command::Create { name, description, status, user, value } => {
      let mut body = json!({
        "name": name,
        "description": description,
        "assigned_to_user_id": user,
        "value": value,
      });
      if let Some(status) = status {
        body["status"] = json!(status);
      }
      let deal = client.create_deal(&body).await?;
      println!("{}", serde_json::to_string_pretty(&deal)?);
    }

    Command::Update { id, name, description, status, user, value } => {
      let mut fields = Map::new();
      if let Some(name) = name {
        fields.insert("name".into(), json!(name));
      }
      if let Some(description) = description {
        fields.insert("description".into(), json!(description));
      }
      if let Some(status) = status {
        fields.insert("status".into(), json!(status));
      }
      if let Some(user) = user {
        fields.insert("assigned_to_user_id".into(), json!(user));
      }
      if let Some(value) = value {
        fields.insert("value".into(), json!(value));
      }
      let deal = client.patch_deal(id, &Value::Object(fields)).await?;
      println!("{}", serde_json::to_string_pretty(&deal)?);
    }

    Command::Delete { id } => {
      client.delete_deal(id).await?;
      println!("deleted deal {id}");
    }
  }

  Ok(())
}
