use std::time::Duration;

use courier::{Deliverer, Error, ReceiverConfig, Result};

#[tokio::main]
async fn main() -> Result<()> {
    // ---
    tracing_subscriber::fmt::init();

    let deliverer: Deliverer<String> = Deliverer::new();
    let sender = deliverer.new_sender("ping")?;
    let receiver =
        deliverer.new_receiver_with_config("ping", ReceiverConfig::default().with_buffer_len(2))?;

    let producer = tokio::spawn(async move {
        for n in 0..10 {
            // Backpressure is an error, not a wait: the producer decides to drop
            match sender.send_to(format!("ping #{n}")) {
                Ok(()) => {}
                Err(Error::ReceiverBufferFull(_)) => println!("dropped ping #{n}"),
                Err(err) => return Err(err),
            }
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
        Ok(())
    });

    let consumer = tokio::spawn(async move {
        loop {
            match receiver.to_receive().await {
                Ok(msg) => {
                    println!("received {msg}");
                    tokio::time::sleep(Duration::from_millis(50)).await;
                }
                Err(Error::LocationDeleted(_)) => break,
                Err(err) => println!("receive error: {err}"),
            }
        }
    });

    producer.await.expect("producer panicked")?;
    deliverer.delete_location("ping");
    consumer.await.expect("consumer panicked");

    Ok(())
}
