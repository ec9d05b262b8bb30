#[tokio::main]
async fn main() {
    recording_scheduler::run().await;
}
