use courier::{Bytes, Deliverer, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
struct AddRequest {
    a: i32,
    b: i32,
}

#[derive(Debug, Serialize, Deserialize)]
struct AddResponse {
    sum: i32,
}

#[tokio::main]
async fn main() -> Result<()> {
    // ---
    tracing_subscriber::fmt::init();

    let deliverer: Deliverer<Bytes> = Deliverer::builder().id("math").build()?;

    let receiver = deliverer.new_receiver("math/add")?;
    receiver.to_sync_receive_json(|req: AddRequest| async move {
        tokio::time::sleep(std::time::Duration::from_millis(100)).await;
        Ok(AddResponse { sum: req.a + req.b })
    });

    let sender = deliverer.new_sender("math/add")?;
    let resp: AddResponse = sender.sync_send_json(&AddRequest { a: 20, b: 3 }).await?;

    println!("20 + 3 = {}", resp.sum);

    deliverer.shutdown();
    Ok(())
}
