#[tokio::main]
async fn main() {
    taskflow_backend::run().await;
}
