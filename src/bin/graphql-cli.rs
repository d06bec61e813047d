use clap::{Parser, ValueEnum};
use reqwest::header::CONTENT_TYPE;
use serde_json::{json, Value};

#[derive(Parser)]
#[command(name = "graphql-cli")]
#[command(about = "Send a GraphQL operation to an HTTP endpoint", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:8080/graphql")]
    url: String,

    /// Operation name to execute.
    #[arg(short, long)]
    operation_name: Option<String>,

    /// Variables as a JSON object.
    #[arg(short, long)]
    variables: Option<String>,

    /// How the operation is encoded on the wire.
    #[arg(short, long, value_enum, default_value_t = Transport::Json)]
    transport: Transport,

    /// GraphQL document.
    query: String,
}

#[derive(Clone, Copy, ValueEnum)]
enum Transport {
    /// POST with an application/json body
    Json,
    /// POST with an application/graphql body
    Graphql,
    /// GET with query-string parameters
    Get,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();

    let variables: Option<Value> = match &cli.variables {
        Some(text) => Some(serde_json::from_str(text)?),
        None => None,
    };

    let res = match cli.transport {
        Transport::Json => {
            let mut body = json!({ "query": cli.query });
            if let Some(name) = &cli.operation_name {
                body["operationName"] = json!(name);
            }
            if let Some(variables) = variables {
                body["variables"] = variables;
            }
            client.post(&cli.url).json(&body).send().await?
        }
        Transport::Graphql => {
            if cli.operation_name.is_some() || variables.is_some() {
                eprintln!("Warning: application/graphql bodies carry no operation name or variables");
            }
            client
                .post(&cli.url)
                .header(CONTENT_TYPE, "application/graphql")
                .body(cli.query)
                .send()
                .await?
        }
        Transport::Get => {
            let mut params = vec![("query", cli.query)];
            if let Some(name) = cli.operation_name {
                params.push(("operationName", name));
            }
            if let Some(variables) = variables {
                params.push(("variables", variables.to_string()));
            }
            client.get(&cli.url).query(&params).send().await?
        }
    };

    print_response(res).await
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    let text = res.text().await?;

    if !status.is_success() {
        eprintln!("Error: endpoint returned status {}", status);
    }

    match serde_json::from_str::<Value>(&text) {
        Ok(json) => println!("{}", serde_json::to_string_pretty(&json)?),
        Err(_) => println!("{}", text),
    }
    Ok(())
}
