mod common;
use std::sync::Arc;
use std::time::Duration;

use axum::http::StatusCode;
use axum_test::multipart::{MultipartForm, Part};
use courseware::uploader::{DiskStorage, ResourceStorage, SelectedFile, SimulatedStorage};
use courseware::web::UserRole;
use courseware::web::routes::STATIC_PREFIX;
use serde_json::json;

use crate::common::{
    Action, FailingStorage, Flow, draft_action, edit_action, save_action, setup_server,
    setup_server_in, setup_server_limited, setup_server_with, upload_action,
};

fn report_form() -> MultipartForm {
    MultipartForm::new().add_part(
        "file",
        Part::bytes(vec![7u8; 2048])
            .file_name("report.pdf")
            .mime_type("application/pdf"),
    )
}

fn list_resources_action() -> Action {
    Action::new("list_resources", "GET", "/api/v1/resources/")
        .as_actor("lea", UserRole::Learner)
}

#[tokio::test]
async fn route_upload_defaults_name_test() {
    let env = setup_server().await;

    Flow::new()
        .step(upload_action("ann", UserRole::Instructor, report_form()).assert_body(|body| {
            assert_eq!(body["resource"]["name"], "report.pdf");
            assert_eq!(body["resource"]["type"], "application/pdf");
            assert_eq!(body["resource"]["size"], 2048);
            assert!(body["resource"]["url"].as_str().unwrap().starts_with("blob:"));
            assert_eq!(body["notifications"][0]["title"], "Resource uploaded");
        }))
        .step(list_resources_action().assert_body(|body| {
            assert_eq!(body["total"], 1);
            assert_eq!(body["items"][0]["name"], "report.pdf");
        }))
        .run(&env)
        .await;
}

#[tokio::test]
async fn route_upload_named_test() {
    let env = setup_server().await;
    let form = MultipartForm::new()
        .add_text("name", "Lecture photo")
        .add_part("file", Part::bytes(vec![1u8; 10]).file_name("board.JPEG"));

    Flow::new()
        .step(upload_action("ann", UserRole::Admin, form).assert_body(|body| {
            assert_eq!(body["resource"]["name"], "Lecture photo");
        }))
        .run(&env)
        .await;

    let resources = env.state.mm().store().resources();
    assert_eq!(resources.len(), 1);
    assert_eq!(resources[0].size(), 10);
}

#[tokio::test]
async fn storage_types_undeclared_files_by_extension_test() {
    let storage = SimulatedStorage::new(Duration::ZERO);
    let cases = [
        ("board.JPEG", "image"),
        ("handout.docx", "document"),
        ("talk.mov", "video"),
        ("theme.flac", "audio"),
        ("backup.tar.gz", "other"),
    ];

    for (filename, expected) in cases {
        let file = SelectedFile::new(filename, "", vec![1u8; 10]);
        let resource = storage.upload_resource(&file, filename).await.unwrap();
        assert_eq!(resource.media_type(), expected, "{filename}");
    }
}

#[tokio::test]
async fn route_upload_missing_file_test() {
    let env = setup_server().await;
    let form = MultipartForm::new().add_text("name", "Syllabus");

    Flow::new()
        .step(
            upload_action("ann", UserRole::Instructor, form)
                .with_expect(StatusCode::BAD_REQUEST)
                .assert_body(|body| {
                    assert!(body["message"].as_str().unwrap().contains("Missing information"));
                }),
        )
        .step(list_resources_action().assert_body(|body| assert_eq!(body["total"], 0)))
        .run(&env)
        .await;
}

#[tokio::test]
async fn route_upload_forbidden_for_learner_test() {
    let env = setup_server().await;

    Flow::new()
        .step(upload_action("lea", UserRole::Learner, report_form()).with_expect(StatusCode::FORBIDDEN))
        .run(&env)
        .await;

    assert!(env.state.mm().store().resources().is_empty());
}

#[tokio::test]
async fn route_upload_storage_failure_test() {
    let env = setup_server_with(Arc::new(FailingStorage)).await;

    Flow::new()
        .step(
            upload_action("ann", UserRole::Instructor, report_form())
                .with_expect(StatusCode::INTERNAL_SERVER_ERROR)
                .assert_body(|body| {
                    let message = body["message"].as_str().unwrap();
                    assert!(message.starts_with("Upload failed"));
                    assert!(message.contains("bucket unavailable"));
                }),
        )
        .step(list_resources_action().assert_body(|body| assert_eq!(body["total"], 0)))
        .run(&env)
        .await;
}

#[tokio::test]
async fn route_disk_upload_is_served_test() {
    let uploads = tempfile::tempdir().unwrap();
    let storage = DiskStorage::new(uploads.path(), STATIC_PREFIX);
    let env = setup_server_in(uploads, Arc::new(storage)).await;

    let form = MultipartForm::new().add_part(
        "file",
        Part::bytes(b"week one".to_vec())
            .file_name("notes.txt")
            .mime_type("text/plain"),
    );

    Flow::new()
        .step(upload_action("ann", UserRole::Instructor, form).with_save_as("upload"))
        .step(
            Action::new("static", "GET", "dynamic").with_dyn_path(|ctx| {
                let upload = ctx.get("upload");
                upload["resource"]["url"].as_str().unwrap().to_string()
            }),
        )
        .run(&env)
        .await;

    let url = env.state.mm().store().resources()[0].url().to_string();
    let body = env.server.get(&url).await.text();
    assert_eq!(body, "week one");
}

#[tokio::test]
async fn route_resource_becomes_lesson_test() {
    let env = setup_server().await;
    let form = MultipartForm::new().add_part(
        "file",
        Part::bytes(vec![0u8; 64])
            .file_name("diagram.png")
            .mime_type("image/png"),
    );

    Flow::new()
        .step(upload_action("ann", UserRole::Instructor, form).with_save_as("upload"))
        .step(edit_action("ann", UserRole::Instructor, 1))
        .step(
            Action::new("add_resource", "PUT", "/api/v1/modules/1/draft")
                .as_actor("ann", UserRole::Instructor)
                .with_dyn_body(|ctx| {
                    let upload = ctx.get("upload");
                    json!({"op": "add_resource", "resource_id": upload["resource"]["id"]})
                })
                .assert_body(|body| {
                    let lesson = &body["lessons"][2];
                    assert_eq!(lesson["type"], "image");
                    assert_eq!(lesson["icon"], "image");
                    assert_eq!(lesson["title"], "diagram.png");
                    assert_eq!(lesson["duration"], "N/A");
                    assert!(lesson["id"].as_str().unwrap().starts_with("1-3-"));
                    assert_eq!(body["resource_selector_open"], false);
                }),
        )
        .step(draft_action(
            "ann",
            UserRole::Instructor,
            1,
            json!({"op": "set_description", "description": "With a diagram"}),
        ))
        .step(save_action("ann", UserRole::Instructor, 1))
        .run(&env)
        .await;

    let module = env.state.mm().store().module(1).unwrap();
    assert_eq!(module.description(), "With a diagram");
    assert_eq!(module.lessons().len(), 3);
}

#[tokio::test]
async fn route_resources_paged_test() {
    let env = setup_server().await;
    let names = ["a.txt", "b.txt", "c.txt"];

    let mut flow = Flow::new();
    for name in names {
        let form = MultipartForm::new().add_part(
            "file",
            Part::bytes(name.as_bytes().to_vec())
                .file_name(name)
                .mime_type("text/plain"),
        );
        flow = flow.step(upload_action("ann", UserRole::Instructor, form));
    }

    flow.step(
        list_resources_action()
            .with_param("limit", "2")
            .with_param("offset", "1")
            .assert_body(|body| {
                assert_eq!(body["total"], 3);
                assert_eq!(body["limit"], 2);
                let items = body["items"].as_array().unwrap();
                assert_eq!(items.len(), 2);
                assert_eq!(items[0]["name"], "b.txt");
                assert_eq!(items[1]["name"], "c.txt");
            }),
    )
    .step(
        Action::new("list_anonymous", "GET", "/api/v1/resources/")
            .with_expect(StatusCode::UNAUTHORIZED),
    )
    .run(&env)
    .await;
}

fn lecture_form(len: usize) -> MultipartForm {
    MultipartForm::new().add_part(
        "file",
        Part::bytes(vec![0u8; len])
            .file_name("lecture.mp4")
            .mime_type("video/mp4"),
    )
}

#[tokio::test]
async fn route_upload_larger_than_axum_default_test() {
    let env = setup_server().await;

    Flow::new()
        .step(
            upload_action("ann", UserRole::Instructor, lecture_form(3 * 1024 * 1024)).assert_body(
                |body| {
                    assert_eq!(body["resource"]["type"], "video/mp4");
                    assert_eq!(body["resource"]["size"], 3 * 1024 * 1024);
                },
            ),
        )
        .run(&env)
        .await;
}

#[tokio::test]
async fn route_upload_over_limit_test() {
    let env = setup_server_limited(64 * 1024).await;

    Flow::new()
        .step(
            upload_action("ann", UserRole::Instructor, lecture_form(256 * 1024))
                .with_expect(StatusCode::PAYLOAD_TOO_LARGE)
                .assert_body(|body| {
                    assert!(body["message"].as_str().unwrap().contains("65536 byte limit"));
                }),
        )
        .step(
            upload_action("ann", UserRole::Instructor, lecture_form(1024)).assert_body(|body| {
                assert_eq!(body["resource"]["size"], 1024);
            }),
        )
        .run(&env)
        .await;
}
