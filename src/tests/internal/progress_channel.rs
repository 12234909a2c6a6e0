//! 进度通道测试：状态机各分支由脚本化假传输/假轮询源驱动，
//! 时间用 start_paused 虚拟时钟，全部确定性执行。

use std::collections::HashMap;
use std::sync::atomic::Ordering;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::time::timeout;

use crate::backend::MediaKind;
use crate::progress::{
    ChannelConfig, ChannelMode, ChannelSubject, OverallProgress,
    ProgressChannel, ProgressSnapshot, ProgressSource, ProgressStatus,
    ProgressTransport,
};
use crate::tests::internal::fakes::{FakeFrame, FakeSource, FakeTransport};

fn subject(username: &str) -> ChannelSubject {
    ChannelSubject::new(username, MediaKind::Stories).unwrap()
}

type Collected = Arc<Mutex<Vec<ProgressSnapshot>>>;

/// 组装一条注入假实现的通道，快照收集进共享 Vec。
fn open_channel(
    transport: &Arc<FakeTransport>,
    source: &Arc<FakeSource>,
    username: &str,
) -> (ProgressChannel, Collected) {
    let collected: Collected = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&collected);
    let transport_dyn: Arc<dyn ProgressTransport> = transport.clone();
    let source_dyn: Arc<dyn ProgressSource> = source.clone();
    let channel =
        ProgressChannel::builder(transport_dyn, source_dyn, subject(username))
            .with_snapshot_hook(move |snap| {
                sink.lock().unwrap().push(snap.clone())
            })
            .open()
            .unwrap();
    (channel, collected)
}

async fn wait_until_mode(channel: &ProgressChannel, target: ChannelMode) {
    let mut watcher = channel.mode().watch();
    if watcher.current() == target {
        return;
    }
    timeout(Duration::from_secs(300), async {
        loop {
            match watcher.changed().await {
                Ok(mode) if mode == target => break,
                Ok(_) => {}
                Err(_) => panic!("模式监听已关闭"),
            }
        }
    })
    .await
    .expect("等待目标模式超时");
}

async fn wait_for_snapshots(
    channel: &ProgressChannel,
    collected: &Collected,
    count: usize,
) {
    let mut watcher = channel.latest_snapshot().watch();
    timeout(Duration::from_secs(300), async {
        loop {
            if collected.lock().unwrap().len() >= count {
                break;
            }
            let _ = watcher.changed().await;
        }
    })
    .await
    .expect("等待快照超时");
}

fn terminal_snapshot() -> ProgressSnapshot {
    ProgressSnapshot {
        overall: OverallProgress {
            status: ProgressStatus::Complete,
            progress: 100.0,
            total: None,
            downloaded: None,
            message: None,
        },
        files: HashMap::new(),
    }
}

#[test]
fn empty_username_fails_synchronously() {
    assert!(ChannelSubject::new("", MediaKind::Stories).is_err());
    assert!(ChannelSubject::new("   ", MediaKind::Stories).is_err());
}

/// 绕过构造器塞进空白用户名时，open 本身也同步报错。
#[tokio::test]
async fn open_rejects_blank_subject() {
    let transport: Arc<dyn ProgressTransport> =
        Arc::new(FakeTransport::new());
    let source: Arc<dyn ProgressSource> = Arc::new(FakeSource::new());
    let blank = ChannelSubject {
        username: "  ".to_string(),
        kind: MediaKind::Stories,
    };
    assert!(
        ProgressChannel::builder(transport, source, blank).open().is_err()
    );
}

/// 模式钩子按序收到状态机的每次迁移。
#[tokio::test(start_paused = true)]
async fn mode_hook_observes_transitions() {
    let transport = Arc::new(FakeTransport::new());
    transport.push_refuse();
    let _tx = transport.push_accept();
    let source = Arc::new(FakeSource::new());

    let modes: Arc<Mutex<Vec<ChannelMode>>> = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&modes);
    let transport_dyn: Arc<dyn ProgressTransport> = transport.clone();
    let source_dyn: Arc<dyn ProgressSource> = source.clone();
    let channel =
        ProgressChannel::builder(transport_dyn, source_dyn, subject("alice"))
            .with_mode_hook(move |mode| sink.lock().unwrap().push(mode))
            .open()
            .unwrap();

    wait_until_mode(&channel, ChannelMode::Live).await;
    {
        let got = modes.lock().unwrap();
        assert_eq!(
            got.as_slice(),
            &[
                ChannelMode::Connecting,
                ChannelMode::Disconnected,
                ChannelMode::Connecting,
                ChannelMode::Live,
            ]
        );
    }
    channel.close().await;
}

#[test]
fn backoff_delay_sequence_matches() {
    let config = ChannelConfig::default();
    let expected_ms = [1000, 2000, 4000, 8000, 10000];
    for (attempt, expected) in (1u32..=5).zip(expected_ms) {
        assert_eq!(
            config.backoff_delay(attempt),
            Duration::from_millis(expected),
            "第 {attempt} 次重连的退避延迟不对"
        );
    }
    // 超出上限后维持封顶值
    assert_eq!(config.backoff_delay(6), Duration::from_millis(10000));
    assert_eq!(config.backoff_delay(30), Duration::from_millis(10000));
}

/// open 后立即 close：连接、定时器全部释放，且没有任何快照回调。
#[tokio::test(start_paused = true)]
async fn open_then_close_releases_everything() {
    let transport = Arc::new(FakeTransport::new());
    let _tx = transport.push_accept();
    let source = Arc::new(FakeSource::new());
    let (channel, collected) = open_channel(&transport, &source, "alice");

    channel.close().await;

    assert_eq!(transport.live_connections.load(Ordering::SeqCst), 0);
    assert!(collected.lock().unwrap().is_empty());
    assert_eq!(channel.mode().get(), ChannelMode::Disconnected);

    // 再关一次也安全，且仍然没有回调
    channel.close().await;
    assert!(collected.lock().unwrap().is_empty());
}

/// 连接成功后进入 live，重连计数清零（即使此前失败过）。
#[tokio::test(start_paused = true)]
async fn success_resets_reconnect_attempts() {
    let transport = Arc::new(FakeTransport::new());
    transport.push_refuse();
    transport.push_refuse();
    let tx = transport.push_accept();
    let source = Arc::new(FakeSource::new());
    let (channel, collected) = open_channel(&transport, &source, "alice");

    wait_until_mode(&channel, ChannelMode::Live).await;

    assert_eq!(transport.attempts.load(Ordering::SeqCst), 3);
    assert_eq!(channel.reconnect_attempts().get(), 0);

    // live 后消息正常送达
    tx.send(FakeFrame::Text(
        r#"{"overall":{"status":"downloading","progress":40}}"#.to_string(),
    ))
    .unwrap();
    wait_for_snapshots(&channel, &collected, 1).await;
    let got = collected.lock().unwrap();
    assert_eq!(got.len(), 1);
    assert_eq!(got[0].overall.status, ProgressStatus::Downloading);
    assert_eq!(got[0].overall.progress, 40.0);

    drop(got);
    channel.close().await;
}

/// 重连耗尽后回退到轮询，且本实例不再尝试推送传输。
#[tokio::test(start_paused = true)]
async fn falls_back_to_polling_after_exhausted_reconnects() {
    let transport = Arc::new(FakeTransport::new());
    let source = Arc::new(FakeSource::new());
    let started = tokio::time::Instant::now();
    let (channel, _collected) = open_channel(&transport, &source, "alice");

    wait_until_mode(&channel, ChannelMode::Polling).await;

    // 首次连接 + 5 次退避重连，全部失败
    assert_eq!(transport.attempts.load(Ordering::SeqCst), 6);
    // 退避总时长 1+2+4+8+10 秒
    let elapsed = started.elapsed();
    assert!(
        elapsed >= Duration::from_secs(25) && elapsed < Duration::from_secs(27),
        "退避耗时异常: {elapsed:?}"
    );

    // 轮询按固定间隔持续发请求，推送传输不再被碰
    tokio::time::sleep(Duration::from_millis(15_750)).await;
    let fetches = source.fetches.load(Ordering::SeqCst);
    assert!(
        (9..=11).contains(&fetches),
        "15 秒内的轮询次数异常: {fetches}"
    );
    assert_eq!(transport.attempts.load(Ordering::SeqCst), 6);

    channel.close().await;
}

/// 非法消息静默丢弃：不换状态、不回调；后续合法消息照常送达。
#[tokio::test(start_paused = true)]
async fn malformed_message_is_dropped_silently() {
    let transport = Arc::new(FakeTransport::new());
    let tx = transport.push_accept();
    let source = Arc::new(FakeSource::new());
    let (channel, collected) = open_channel(&transport, &source, "alice");

    wait_until_mode(&channel, ChannelMode::Live).await;

    tx.send(FakeFrame::Text("{截断的 json".to_string())).unwrap();
    tx.send(FakeFrame::Text("\"pong\"".to_string())).unwrap();
    tx.send(FakeFrame::Text(
        r#"{"overall":{"status":"fetching","progress":5},"files":{"a.mp4":{"status":"downloading","progress":50}}}"#
            .to_string(),
    ))
    .unwrap();

    wait_for_snapshots(&channel, &collected, 1).await;
    let got = collected.lock().unwrap();
    assert_eq!(got.len(), 1, "非法消息不应触发回调");
    assert_eq!(got[0].overall.status, ProgressStatus::Fetching);
    assert_eq!(got[0].files["a.mp4"].progress, 50.0);
    drop(got);

    assert_eq!(channel.mode().get(), ChannelMode::Live);
    channel.close().await;
}

/// 推送消息按字段合并：只带 files 的消息不清掉已有 overall。
#[tokio::test(start_paused = true)]
async fn push_payloads_merge_into_snapshot() {
    let transport = Arc::new(FakeTransport::new());
    let tx = transport.push_accept();
    let source = Arc::new(FakeSource::new());
    let (channel, collected) = open_channel(&transport, &source, "alice");

    wait_until_mode(&channel, ChannelMode::Live).await;

    tx.send(FakeFrame::Text(
        r#"{"overall":{"status":"downloading","progress":30}}"#.to_string(),
    ))
    .unwrap();
    tx.send(FakeFrame::Text(
        r#"{"files":{"b.jpg":{"status":"complete","progress":100}}}"#
            .to_string(),
    ))
    .unwrap();

    wait_for_snapshots(&channel, &collected, 2).await;
    let got = collected.lock().unwrap();
    assert_eq!(got[1].overall.status, ProgressStatus::Downloading);
    assert_eq!(got[1].overall.progress, 30.0);
    assert_eq!(got[1].files["b.jpg"].status, "complete");
    drop(got);

    channel.close().await;
}

/// 轮询拿到终态快照：恰好回调一次，然后停止轮询。
#[tokio::test(start_paused = true)]
async fn polling_stops_after_terminal_snapshot() {
    let transport = Arc::new(FakeTransport::new());
    let source = Arc::new(FakeSource::new());
    source.push_ok(terminal_snapshot());
    let (channel, collected) = open_channel(&transport, &source, "alice");

    wait_until_mode(&channel, ChannelMode::Polling).await;
    wait_for_snapshots(&channel, &collected, 1).await;

    {
        let got = collected.lock().unwrap();
        assert_eq!(got.as_slice(), &[terminal_snapshot()]);
    }
    assert_eq!(source.fetches.load(Ordering::SeqCst), 1);

    // 终态后不再有任何请求与回调
    tokio::time::sleep(Duration::from_secs(30)).await;
    assert_eq!(source.fetches.load(Ordering::SeqCst), 1);
    assert_eq!(collected.lock().unwrap().len(), 1);

    channel.close().await;
}

/// 轮询失败只是下个周期重试，不向消费者暴露错误。
#[tokio::test(start_paused = true)]
async fn polling_errors_are_retried_silently() {
    let transport = Arc::new(FakeTransport::new());
    let source = Arc::new(FakeSource::new());
    source.push_err();
    source.push_err();
    source.push_ok(terminal_snapshot());
    let (channel, collected) = open_channel(&transport, &source, "alice");

    wait_until_mode(&channel, ChannelMode::Polling).await;
    wait_for_snapshots(&channel, &collected, 1).await;

    // 前两次失败被吸收，只有成功那次触发回调
    assert_eq!(source.fetches.load(Ordering::SeqCst), 3);
    assert_eq!(collected.lock().unwrap().len(), 1);

    channel.close().await;
}

/// live 断开后走退避重连，第二条连接继续送达消息。
#[tokio::test(start_paused = true)]
async fn reconnects_after_live_connection_drops() {
    let transport = Arc::new(FakeTransport::new());
    let tx1 = transport.push_accept();
    let tx2 = transport.push_accept();
    let source = Arc::new(FakeSource::new());
    let (channel, collected) = open_channel(&transport, &source, "alice");

    wait_until_mode(&channel, ChannelMode::Live).await;
    tx1.send(FakeFrame::Close).unwrap();

    // 断开 → disconnected → 1 秒退避后重连成功
    wait_until_mode(&channel, ChannelMode::Disconnected).await;
    wait_until_mode(&channel, ChannelMode::Live).await;
    assert_eq!(transport.attempts.load(Ordering::SeqCst), 2);
    assert_eq!(channel.reconnect_attempts().get(), 0);

    tx2.send(FakeFrame::Text(
        r#"{"overall":{"status":"downloading","progress":70}}"#.to_string(),
    ))
    .unwrap();
    wait_for_snapshots(&channel, &collected, 1).await;
    assert_eq!(
        collected.lock().unwrap()[0].overall.progress,
        70.0
    );

    channel.close().await;
}

/// live 期间按配置的心跳间隔发送保活帧。
#[tokio::test(start_paused = true)]
async fn heartbeat_frames_are_sent_while_live() {
    let transport = Arc::new(FakeTransport::new());
    let _tx = transport.push_accept();
    let source = Arc::new(FakeSource::new());

    let transport_dyn: Arc<dyn ProgressTransport> = transport.clone();
    let source_dyn: Arc<dyn ProgressSource> = source.clone();
    let channel =
        ProgressChannel::builder(transport_dyn, source_dyn, subject("alice"))
            .with_config(ChannelConfig {
                heartbeat_interval: Duration::from_secs(5),
                ..ChannelConfig::default()
            })
            .open()
            .unwrap();

    wait_until_mode(&channel, ChannelMode::Live).await;
    tokio::time::sleep(Duration::from_secs(16)).await;

    let keepalives = transport.keepalives.load(Ordering::SeqCst);
    assert!(
        (2..=4).contains(&keepalives),
        "16 秒内的心跳次数异常: {keepalives}"
    );

    channel.close().await;
}

/// close 返回后不再有任何回调（向已关闭的通道补发消息无效果）。
#[tokio::test(start_paused = true)]
async fn no_callbacks_after_close() {
    let transport = Arc::new(FakeTransport::new());
    let tx = transport.push_accept();
    let source = Arc::new(FakeSource::new());
    let (channel, collected) = open_channel(&transport, &source, "alice");

    wait_until_mode(&channel, ChannelMode::Live).await;
    tx.send(FakeFrame::Text(
        r#"{"overall":{"status":"downloading","progress":10}}"#.to_string(),
    ))
    .unwrap();
    wait_for_snapshots(&channel, &collected, 1).await;

    channel.close().await;
    let _ = tx.send(FakeFrame::Text(
        r#"{"overall":{"status":"downloading","progress":99}}"#.to_string(),
    ));
    tokio::time::sleep(Duration::from_secs(5)).await;

    assert_eq!(collected.lock().unwrap().len(), 1);
    assert_eq!(channel.mode().get(), ChannelMode::Disconnected);

    channel.close().await;
    assert_eq!(collected.lock().unwrap().len(), 1);
}
