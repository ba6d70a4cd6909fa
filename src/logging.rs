use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

/// 로그 초기화 (여러 번 호출해도 안전)
///
/// `RUST_LOG`가 있으면 그 값을, 없으면 verbose 여부로 레벨을 정한다.
/// stdout은 결과 출력(JSON 등)에 쓰므로 로그는 stderr로 보낸다.
pub fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let stderr_layer = fmt::layer()
        .with_target(verbose)
        .with_writer(std::io::stderr);

    // 이미 설정된 경우(테스트 등)는 무시
    let _ = Registry::default()
        .with(env_filter)
        .with(stderr_layer)
        .try_init();
}
