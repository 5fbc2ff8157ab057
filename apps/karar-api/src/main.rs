use clap::Parser;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
	color_eyre::install()?;

	let args = karar_api::Args::parse();

	karar_api::run(args).await
}
