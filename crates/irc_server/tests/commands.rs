mod support;

use support::{connect, recv_line, register, send, start_server};

async fn join_and_drain(conn: &mut tokio::io::BufReader<tokio::net::TcpStream>, channel: &str) {
    send(conn, &format!("JOIN {channel}")).await;
    for _ in 0..4 {
        recv_line(conn).await;
    }
}

#[tokio::test]
async fn part_removes_membership_and_deletes_empty_channel() {
    let (addr, server) = start_server().await;
    let mut a = connect(addr).await;
    register(&mut a, "alice").await;
    join_and_drain(&mut a, "#room").await;

    send(&mut a, "PART #room :done").await;
    assert_eq!(recv_line(&mut a).await, ":alice!alice@unknown PART #room :done\r\n");

    // the channel was deleted once empty, so re-joining creates it fresh
    // and alice becomes operator again.
    send(&mut a, "JOIN #room").await;
    assert_eq!(recv_line(&mut a).await, ":alice!alice@unknown JOIN :#room\r\n");
    recv_line(&mut a).await; // 331
    assert_eq!(recv_line(&mut a).await, ":ft_irc 353 alice = #room :@alice\r\n");

    server.abort();
}

#[tokio::test]
async fn part_of_channel_not_joined_is_rejected() {
    let (addr, server) = start_server().await;
    let mut a = connect(addr).await;
    register(&mut a, "alice").await;

    send(&mut a, "PART #ghost").await;
    assert!(recv_line(&mut a).await.contains("403"));

    join_and_drain(&mut a, "#room").await;
    let mut b = connect(addr).await;
    register(&mut b, "bob").await;
    send(&mut b, "PART #room").await;
    assert!(recv_line(&mut b).await.contains("442"));

    server.abort();
}

#[tokio::test]
async fn topic_protected_requires_operator() {
    let (addr, server) = start_server().await;
    let mut a = connect(addr).await;
    register(&mut a, "alice").await;
    join_and_drain(&mut a, "#room").await;
    let mut b = connect(addr).await;
    register(&mut b, "bob").await;
    join_and_drain(&mut b, "#room").await;
    recv_line(&mut a).await; // alice sees bob's JOIN

    send(&mut a, "MODE #room +t").await;
    assert_eq!(recv_line(&mut a).await, ":alice!alice@unknown MODE #room +t\r\n");
    recv_line(&mut b).await;

    send(&mut b, "TOPIC #room :new topic").await;
    assert!(recv_line(&mut b).await.contains("482"));

    send(&mut a, "TOPIC #room :new topic").await;
    assert_eq!(recv_line(&mut a).await, ":alice!alice@unknown TOPIC #room :new topic\r\n");
    assert_eq!(recv_line(&mut b).await, ":alice!alice@unknown TOPIC #room :new topic\r\n");

    send(&mut a, "TOPIC #room").await;
    assert_eq!(recv_line(&mut a).await, ":ft_irc 332 alice #room :new topic\r\n");

    server.abort();
}

#[tokio::test]
async fn mode_key_and_limit_gate_join() {
    let (addr, server) = start_server().await;
    let mut a = connect(addr).await;
    register(&mut a, "alice").await;
    join_and_drain(&mut a, "#room").await;

    send(&mut a, "MODE #room +k hunter2").await;
    assert!(recv_line(&mut a).await.contains("+k hunter2"));

    let mut b = connect(addr).await;
    register(&mut b, "bob").await;
    send(&mut b, "JOIN #room").await;
    assert!(recv_line(&mut b).await.contains("475"));

    send(&mut b, "JOIN #room hunter2").await;
    assert_eq!(recv_line(&mut b).await, ":bob!bob@unknown JOIN :#room\r\n");
    for _ in 0..3 {
        recv_line(&mut b).await;
    }
    recv_line(&mut a).await; // alice sees bob's JOIN

    send(&mut a, "MODE #room +l 2").await;
    assert!(recv_line(&mut a).await.contains("+l 2"));
    recv_line(&mut b).await;

    let mut c = connect(addr).await;
    register(&mut c, "carol").await;
    send(&mut c, "JOIN #room hunter2").await;
    assert!(recv_line(&mut c).await.contains("471"));

    server.abort();
}

#[tokio::test]
async fn mode_grants_and_revokes_operator() {
    let (addr, server) = start_server().await;
    let mut a = connect(addr).await;
    register(&mut a, "alice").await;
    join_and_drain(&mut a, "#room").await;
    let mut b = connect(addr).await;
    register(&mut b, "bob").await;
    join_and_drain(&mut b, "#room").await;
    recv_line(&mut a).await;

    send(&mut b, "MODE #room +o bob").await;
    assert!(recv_line(&mut b).await.contains("482"));

    send(&mut a, "MODE #room +o bob").await;
    assert_eq!(recv_line(&mut a).await, ":alice!alice@unknown MODE #room +o bob\r\n");
    recv_line(&mut b).await;

    send(&mut b, "KICK #room alice :bye").await;
    assert_eq!(recv_line(&mut a).await, ":bob!bob@unknown KICK #room alice :bye\r\n");

    server.abort();
}

#[tokio::test]
async fn kick_requires_operator_and_removes_target() {
    let (addr, server) = start_server().await;
    let mut a = connect(addr).await;
    register(&mut a, "alice").await;
    join_and_drain(&mut a, "#room").await;
    let mut b = connect(addr).await;
    register(&mut b, "bob").await;
    join_and_drain(&mut b, "#room").await;
    recv_line(&mut a).await;

    send(&mut b, "KICK #room alice").await;
    assert!(recv_line(&mut b).await.contains("482"));

    send(&mut a, "KICK #room bob :out").await;
    assert_eq!(recv_line(&mut a).await, ":alice!alice@unknown KICK #room bob :out\r\n");
    assert_eq!(recv_line(&mut b).await, ":alice!alice@unknown KICK #room bob :out\r\n");

    // bob is gone; rejoining sees only alice in NAMES.
    join_and_drain(&mut b, "#room").await;
    recv_line(&mut a).await; // alice sees bob rejoin

    server.abort();
}

#[tokio::test]
async fn privmsg_to_nick_and_empty_text() {
    let (addr, server) = start_server().await;
    let mut a = connect(addr).await;
    register(&mut a, "alice").await;
    let mut b = connect(addr).await;
    register(&mut b, "bob").await;

    send(&mut a, "PRIVMSG bob :hello there").await;
    assert_eq!(recv_line(&mut b).await, ":alice!alice@unknown PRIVMSG bob :hello there\r\n");

    send(&mut a, "PRIVMSG bob :").await;
    assert!(recv_line(&mut a).await.contains("412"));

    send(&mut a, "PRIVMSG nobody :hi").await;
    assert!(recv_line(&mut a).await.contains("401"));

    server.abort();
}

#[tokio::test]
async fn nick_change_broadcasts_to_shared_channels() {
    let (addr, server) = start_server().await;
    let mut a = connect(addr).await;
    register(&mut a, "alice").await;
    join_and_drain(&mut a, "#room").await;
    let mut b = connect(addr).await;
    register(&mut b, "bob").await;
    join_and_drain(&mut b, "#room").await;
    recv_line(&mut a).await;

    send(&mut a, "NICK alicia").await;
    assert_eq!(recv_line(&mut a).await, ":alice!alice@unknown NICK :alicia\r\n");
    assert_eq!(recv_line(&mut b).await, ":alice!alice@unknown NICK :alicia\r\n");

    server.abort();
}
