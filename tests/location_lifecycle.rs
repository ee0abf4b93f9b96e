// tests/location_lifecycle.rs

use std::sync::Barrier;
use std::time::Duration;

use tokio::time::timeout;

use courier::{Deliverer, Error, Location};

#[tokio::test]
async fn delete_wakes_blocked_receiver() {
    // ---
    // Arrange
    // ---
    let deliverer: Deliverer<u32> = Deliverer::new();
    let _sender = deliverer.new_sender("wake").expect("sender");
    let receiver = deliverer.new_receiver("wake").expect("receiver");

    let waiter = tokio::spawn(async move { receiver.to_receive().await });

    // ---
    // Act
    // ---
    tokio::time::sleep(Duration::from_millis(30)).await;
    deliverer.delete_location("wake");

    // ---
    // Assert
    // ---
    let res = timeout(Duration::from_secs(2), waiter)
        .await
        .expect("receiver still blocked after delete")
        .expect("receiver task panicked");
    assert!(matches!(res, Err(Error::LocationDeleted(loc)) if loc == "wake"));
}

#[tokio::test]
async fn delete_drains_buffered_values_first() {
    // ---
    let deliverer: Deliverer<u32> = Deliverer::new();
    let sender = deliverer.new_sender("drain").expect("sender");
    let receiver = deliverer.new_receiver("drain").expect("receiver");

    sender.send_to(1).expect("send 1");
    sender.send_to(2).expect("send 2");
    deliverer.delete_location("drain");

    assert_eq!(receiver.to_receive().await.expect("first"), 1);
    assert_eq!(receiver.to_receive().await.expect("second"), 2);
    assert!(matches!(
        receiver.to_receive().await,
        Err(Error::LocationDeleted(_))
    ));
}

#[tokio::test]
async fn deleted_location_is_terminal() {
    // ---
    let deliverer: Deliverer<u32> = Deliverer::new();
    let sender = deliverer.new_sender("gone").expect("sender");
    let receiver = deliverer.new_receiver("gone").expect("receiver");
    receiver.to_sync_receive(|v: u32| async move { Ok(v) });

    deliverer.delete_location("gone");
    deliverer.delete_location("gone");
    deliverer.delete_location("never-existed");

    assert!(matches!(sender.send_to(1), Err(Error::LocationDeleted(_))));
    assert!(matches!(
        receiver.to_receive().await,
        Err(Error::LocationDeleted(_))
    ));
    assert!(matches!(
        receiver.try_receive(),
        Err(Error::LocationDeleted(_))
    ));

    // Records survive deletion, so the location cannot be reused
    assert!(matches!(
        deliverer.new_sender("gone"),
        Err(Error::DuplicateLocation { .. })
    ));
    assert!(matches!(
        deliverer.new_receiver("gone"),
        Err(Error::DuplicateLocation { .. })
    ));

    // Sync calls do not use the transport
    assert_eq!(sender.sync_send_to(5).await.expect("sync after delete"), 5);
    assert!(deliverer.locations().is_empty());
}

#[tokio::test]
async fn shutdown_closes_every_location() {
    // ---
    let deliverer: Deliverer<u32> = Deliverer::new();
    let mut receivers = Vec::new();
    for name in ["a", "b", "c"] {
        let _ = deliverer.new_sender(name).expect("sender");
        receivers.push(deliverer.new_receiver(name).expect("receiver"));
    }
    assert_eq!(
        deliverer.locations(),
        vec![
            Location::new("a").unwrap(),
            Location::new("b").unwrap(),
            Location::new("c").unwrap()
        ]
    );

    deliverer.shutdown();

    for receiver in &receivers {
        assert!(matches!(
            receiver.to_receive().await,
            Err(Error::LocationDeleted(_))
        ));
    }
}

#[test]
fn concurrent_registration_has_one_winner() {
    // ---
    const CONTENDERS: usize = 16;

    let deliverer: Deliverer<u32> = Deliverer::new();
    let barrier = Barrier::new(CONTENDERS);

    let (senders, receivers) = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..CONTENDERS)
            .map(|_| {
                scope.spawn(|| {
                    barrier.wait();
                    (
                        deliverer.new_sender("race").is_ok(),
                        deliverer.new_receiver("race").is_ok(),
                    )
                })
            })
            .collect();

        handles
            .into_iter()
            .map(|h| h.join().expect("contender panicked"))
            .fold((0, 0), |(s, r), (sok, rok)| {
                (s + usize::from(sok), r + usize::from(rok))
            })
    });

    assert_eq!(senders, 1);
    assert_eq!(receivers, 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn delete_races_with_traffic() {
    // ---
    let deliverer: Deliverer<u64> = Deliverer::builder()
        .buffer_len(64)
        .build()
        .expect("deliverer");
    let sender = deliverer.new_sender("busy").expect("sender");
    let receiver = deliverer.new_receiver("busy").expect("receiver");

    let producer = tokio::spawn(async move {
        let mut sent = Vec::new();
        for i in 0u64.. {
            match sender.send_to(i) {
                Ok(()) => sent.push(i),
                Err(Error::ReceiverBufferFull(_)) => tokio::task::yield_now().await,
                Err(Error::LocationDeleted(_)) => break,
                Err(other) => panic!("unexpected send error: {other}"),
            }
        }
        sent
    });

    let consumer = tokio::spawn(async move {
        let mut got = Vec::new();
        loop {
            match receiver.to_receive().await {
                Ok(v) => got.push(v),
                Err(Error::LocationDeleted(_)) => break,
                Err(other) => panic!("unexpected receive error: {other}"),
            }
        }
        got
    });

    tokio::time::sleep(Duration::from_millis(20)).await;
    deliverer.delete_location("busy");

    let sent = timeout(Duration::from_secs(5), producer)
        .await
        .expect("producer hung")
        .expect("producer panicked");
    let got = timeout(Duration::from_secs(5), consumer)
        .await
        .expect("consumer hung")
        .expect("consumer panicked");

    // Every accepted value arrives, in order
    assert_eq!(got, sent);
}
