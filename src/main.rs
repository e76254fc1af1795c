#[actix_web::main]
async fn main() -> std::io::Result<()> {
    evoter_server::run().await
}
