use axum::http::StatusCode;
use axum_test::TestServer;
use cortext_core::domain::step::StepCommand;
use cortext_server::config::Config;
use cortext_server::create_router;
use cortext_server::state::AppState;
use serde_json::{Value, json};
use std::path::Path;
use std::time::{Duration, Instant};
use tempfile::TempDir;

fn test_config(dir: &Path, native: StepCommand, scripts: Vec<StepCommand>) -> Config {
    let work_dir = dir.join("work");
    std::fs::create_dir_all(&work_dir).expect("Failed to create work dir");

    Config {
        bind_addr: "127.0.0.1:0".to_string(),
        input_file: dir.join("input.txt"),
        html_file: dir.join("000_cortext_io.html"),
        work_dir,
        log_file: dir.join("api_logs.log"),
        native_command: native,
        script_steps: scripts,
    }
}

fn setup_test_server(native: StepCommand, scripts: Vec<StepCommand>) -> (TestServer, TempDir) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config = test_config(temp_dir.path(), native, scripts);
    let server =
        TestServer::new(create_router(AppState::new(config))).expect("Failed to create server");
    (server, temp_dir)
}

fn default_server() -> (TestServer, TempDir) {
    setup_test_server(
        StepCommand::shell("echo native ok"),
        vec![StepCommand::shell("echo one"), StepCommand::shell("echo two")],
    )
}

mod health {
    use super::*;

    #[tokio::test]
    async fn test_health_endpoint() {
        let (server, _temp_dir) = default_server();

        let response = server.get("/health").await;

        response.assert_status_ok();
        assert_eq!(response.text(), "OK");
    }
}

mod write {
    use super::*;

    #[tokio::test]
    async fn test_write_stores_exact_text() {
        let (server, temp_dir) = default_server();
        let text = "Item 1A. Risk Factors\n\n  Currency — fluctuations\r\n";

        let response = server.post("/write").json(&json!({ "text": text })).await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["status"], "success");
        assert_eq!(body["message"], "Text written to file");

        let stored = std::fs::read_to_string(temp_dir.path().join("input.txt")).unwrap();
        assert_eq!(stored, text);
    }

    #[tokio::test]
    async fn test_write_overwrites_previous_text() {
        let (server, temp_dir) = default_server();

        server
            .post("/write")
            .json(&json!({ "text": "first, and rather long" }))
            .await
            .assert_status_ok();
        server
            .post("/write")
            .json(&json!({ "text": "second" }))
            .await
            .assert_status_ok();

        let stored = std::fs::read_to_string(temp_dir.path().join("input.txt")).unwrap();
        assert_eq!(stored, "second");
    }

    #[tokio::test]
    async fn test_write_to_missing_directory_returns_500() {
        let temp_dir = TempDir::new().unwrap();
        let mut config = test_config(
            temp_dir.path(),
            StepCommand::shell("true"),
            vec![StepCommand::shell("true")],
        );
        config.input_file = temp_dir.path().join("nope").join("input.txt");
        let server = TestServer::new(create_router(AppState::new(config))).unwrap();

        let response = server.post("/write").json(&json!({ "text": "x" })).await;

        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
        let body: Value = response.json();
        assert!(body["detail"].is_string());
    }
}

mod download {
    use super::*;

    #[tokio::test]
    async fn test_missing_artifact_returns_404() {
        let (server, _temp_dir) = default_server();

        let response = server.get("/download-html").await;

        response.assert_status(StatusCode::NOT_FOUND);
        let body: Value = response.json();
        assert_eq!(body["detail"], "HTML file not found");
    }

    #[tokio::test]
    async fn test_artifact_is_served_byte_for_byte() {
        let (server, temp_dir) = default_server();
        let html = b"<html><body>Association web \xe2\x80\x94 10K</body></html>\n".to_vec();
        std::fs::write(temp_dir.path().join("000_cortext_io.html"), &html).unwrap();

        let response = server.get("/download-html").await;

        response.assert_status_ok();
        assert_eq!(response.as_bytes().to_vec(), html);
        assert_eq!(response.header("content-type"), "text/html");
        assert_eq!(
            response.header("content-disposition"),
            "attachment; filename=\"000_cortext_io.html\""
        );
    }

    #[tokio::test]
    async fn test_unreadable_artifact_returns_500() {
        let temp_dir = TempDir::new().unwrap();
        let mut config = test_config(
            temp_dir.path(),
            StepCommand::shell("true"),
            vec![StepCommand::shell("true")],
        );
        let artifact_dir = temp_dir.path().join("report.html");
        std::fs::create_dir_all(&artifact_dir).unwrap();
        config.html_file = artifact_dir;
        let server = TestServer::new(create_router(AppState::new(config))).unwrap();

        let response = server.get("/download-html").await;

        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
        let body: Value = response.json();
        assert!(body["detail"].is_string());
    }

    #[tokio::test]
    async fn test_large_artifact_is_streamed_intact() {
        let (server, temp_dir) = default_server();
        let html: Vec<u8> = b"<p>0123456789</p>"
            .iter()
            .copied()
            .cycle()
            .take(200_000)
            .collect();
        std::fs::write(temp_dir.path().join("000_cortext_io.html"), &html).unwrap();

        let response = server.get("/download-html").await;

        response.assert_status_ok();
        assert_eq!(response.header("content-length"), html.len().to_string());
        assert_eq!(response.as_bytes().len(), html.len());
        assert_eq!(response.as_bytes().to_vec(), html);
    }
}

mod run_native {
    use super::*;

    #[tokio::test]
    async fn test_success_returns_stdout() {
        let (server, _temp_dir) = default_server();

        let response = server.post("/run-java").await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["status"], "success");
        assert_eq!(body["output"], "native ok\n");
        assert!(body["error"].is_null());
    }

    #[tokio::test]
    async fn test_failure_is_reported_in_band() {
        let (server, _temp_dir) = setup_test_server(
            StepCommand::shell("echo 'no input.txt' >&2; exit 2"),
            vec![StepCommand::shell("true")],
        );

        let response = server.post("/run-java").await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["status"], "error");
        assert_eq!(body["message"], "Native process failed");
        assert_eq!(body["error"], "no input.txt\n");
        assert!(body["output"].is_null());
    }

    #[tokio::test]
    async fn test_launch_failure_returns_500() {
        let (server, _temp_dir) = setup_test_server(
            StepCommand::exec("/nonexistent/cortext/run.sh", Vec::<String>::new()),
            vec![StepCommand::shell("true")],
        );

        let response = server.post("/run-java").await;

        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
        let body: Value = response.json();
        assert!(
            body["detail"]
                .as_str()
                .unwrap()
                .contains("/nonexistent/cortext/run.sh")
        );
    }
}

mod run_scripts {
    use super::*;

    #[tokio::test]
    async fn test_all_steps_succeed() {
        let (server, _temp_dir) = default_server();

        let response = server.post("/run-python-scripts").await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["status"], "success");
        assert_eq!(body["message"], "All scripts executed successfully");
        assert!(!body["run_id"].as_str().unwrap().is_empty());

        let results = body["results"].as_array().unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0]["script"], "echo one");
        assert_eq!(results[0]["returncode"], 0);
        assert_eq!(results[0]["stdout"], "one\n");
        assert_eq!(results[0]["stderr"], "");
        assert!(results[0]["duration_seconds"].as_f64().unwrap() >= 0.0);
        assert_eq!(results[1]["script"], "echo two");
    }

    #[tokio::test]
    async fn test_stops_at_first_failure() {
        let (server, temp_dir) = setup_test_server(
            StepCommand::shell("true"),
            vec![
                StepCommand::shell("touch a.done"),
                StepCommand::shell("echo 'layout failed' >&2; exit 3"),
                StepCommand::shell("touch c.done"),
            ],
        );

        let response = server.post("/run-python-scripts").await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["status"], "error");
        assert_eq!(
            body["message"],
            "Script echo 'layout failed' >&2; exit 3 failed"
        );

        let results = body["results"].as_array().unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[1]["returncode"], 3);
        assert_eq!(results[1]["stderr"], "layout failed\n");

        let work_dir = temp_dir.path().join("work");
        assert!(work_dir.join("a.done").exists());
        assert!(!work_dir.join("c.done").exists());
    }

    #[tokio::test]
    async fn test_launch_failure_returns_structured_500() {
        let (server, _temp_dir) = setup_test_server(
            StepCommand::shell("true"),
            vec![StepCommand::exec("/nonexistent/python3", ["CORTEXT_TRANSFORM.py"])],
        );

        let response = server.post("/run-python-scripts").await;

        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
        let body: Value = response.json();
        assert_eq!(body["detail"]["status"], "error");
        assert!(body["detail"]["run_id"].is_string());
        assert!(
            body["detail"]["message"]
                .as_str()
                .unwrap()
                .contains("/nonexistent/python3")
        );
    }

    #[tokio::test]
    async fn test_duration_reflects_delay() {
        let (server, _temp_dir) = setup_test_server(
            StepCommand::shell("true"),
            vec![StepCommand::exec("sleep", ["0.2"])],
        );

        let response = server.post("/run-python-scripts").await;

        let body: Value = response.json();
        let duration = body["results"][0]["duration_seconds"].as_f64().unwrap();
        assert!(duration >= 0.1, "duration was {}", duration);
    }

    #[tokio::test]
    async fn test_each_run_gets_its_own_id() {
        let (server, _temp_dir) = default_server();

        let first: Value = server.post("/run-python-scripts").await.json();
        let second: Value = server.post("/run-python-scripts").await.json();

        assert_ne!(first["run_id"], second["run_id"]);
    }

    #[tokio::test]
    async fn test_scripts_read_written_input() {
        let (server, _temp_dir) = setup_test_server(
            StepCommand::shell("true"),
            vec![StepCommand::exec("cat", ["../input.txt"])],
        );

        server
            .post("/write")
            .json(&json!({ "text": "quarterly risk text" }))
            .await
            .assert_status_ok();
        let body: Value = server.post("/run-python-scripts").await.json();

        assert_eq!(body["results"][0]["stdout"], "quarterly risk text");
    }
}

mod run_full_process {
    use super::*;

    #[tokio::test]
    async fn test_runs_native_then_scripts() {
        let (server, temp_dir) = setup_test_server(
            StepCommand::shell("touch native.done"),
            vec![
                StepCommand::shell("test -f native.done && echo saw native"),
                StepCommand::shell("echo last"),
            ],
        );

        let response = server.post("/run-full-process").await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["status"], "success");
        let results = body["results"].as_array().unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0]["stdout"], "saw native\n");
        assert!(temp_dir.path().join("work").join("native.done").exists());
    }

    #[tokio::test]
    async fn test_native_failure_short_circuits() {
        let (server, temp_dir) = setup_test_server(
            StepCommand::shell("echo 'java heap exhausted' >&2; exit 1"),
            vec![StepCommand::shell("touch scripted.done")],
        );

        let response = server.post("/run-full-process").await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["status"], "error");
        assert_eq!(
            body["message"],
            "Native process failed: java heap exhausted\n"
        );
        assert!(body["run_id"].is_string());
        assert_eq!(body["results"], json!([]));
        assert!(!temp_dir.path().join("work").join("scripted.done").exists());
    }

    #[tokio::test]
    async fn test_native_launch_failure_returns_structured_500() {
        let (server, _temp_dir) = setup_test_server(
            StepCommand::exec("/nonexistent/run.sh", Vec::<String>::new()),
            vec![StepCommand::shell("true")],
        );

        let response = server.post("/run-full-process").await;

        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
        let body: Value = response.json();
        assert_eq!(body["detail"]["status"], "error");
        assert!(body["detail"]["run_id"].is_string());
    }
}

mod concurrency {
    use super::*;

    // Writes are not held back while a run is in flight, and the run sees
    // whatever the input file holds when its step reads it.
    #[tokio::test]
    async fn test_write_is_not_serialized_against_run() {
        let (server, temp_dir) = setup_test_server(
            StepCommand::shell("true"),
            vec![StepCommand::shell("sleep 0.5; cat ../input.txt")],
        );
        std::fs::write(temp_dir.path().join("input.txt"), "before").unwrap();

        let run = async {
            let response = server.post("/run-python-scripts").await;
            (response, Instant::now())
        };
        let write = async {
            tokio::time::sleep(Duration::from_millis(100)).await;
            let response = server.post("/write").json(&json!({ "text": "during" })).await;
            (response, Instant::now())
        };

        let ((run_response, run_done), (write_response, write_done)) = tokio::join!(run, write);

        write_response.assert_status_ok();
        run_response.assert_status_ok();
        assert!(write_done < run_done);

        let body: Value = run_response.json();
        assert_eq!(body["results"][0]["stdout"], "during");
    }
}
