use serde_json::json;

use crate::common::{TestApp, routes};

mod creation {
    use super::*;

    #[tokio::test]
    async fn creates_a_record_with_derived_fields() {
        let app = TestApp::spawn().await;

        let res = app
            .post(
                routes::STUDENTS,
                &json!({
                    "roll": 1,
                    "name": "Asha Rao",
                    "subject": "Physics",
                    "full": 100,
                    "pass": 40,
                    "obtain": 75
                }),
            )
            .await;

        assert_eq!(res.status, 201, "Create failed: {}", res.text);
        assert_eq!(res.body["roll"], 1);
        assert_eq!(res.body["name"], "Asha Rao");
        assert_eq!(res.body["subject"], "Physics");
        assert_eq!(res.body["percentage"], 75.0);
        assert_eq!(res.body["result"], "Pass");
        assert!(res.body["created_at"].is_string());
        assert!(res.body["updated_at"].is_string());
        // The surrogate storage key never leaves the service.
        assert!(res.body.get("id").is_none());
    }

    #[tokio::test]
    async fn below_pass_threshold_derives_fail() {
        let app = TestApp::spawn().await;

        let body = app.create_student(2, 50.0, 20.0, 15.0).await;

        assert_eq!(body["percentage"], 30.0);
        assert_eq!(body["result"], "Fail");
    }

    #[tokio::test]
    async fn zero_valued_marks_are_present_not_missing() {
        let app = TestApp::spawn().await;

        let res = app
            .post(
                routes::STUDENTS,
                &json!({
                    "roll": 3,
                    "name": "Binod Karki",
                    "subject": "Chemistry",
                    "full": 100,
                    "pass": 0,
                    "obtain": 0
                }),
            )
            .await;

        assert_eq!(res.status, 201, "Create failed: {}", res.text);
        assert_eq!(res.body["percentage"], 0.0);
        assert_eq!(res.body["result"], "Pass");
    }

    #[tokio::test]
    async fn missing_fields_are_each_named() {
        let app = TestApp::spawn().await;

        let res = app
            .post(routes::STUDENTS, &json!({"roll": 4, "name": "No Marks"}))
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "MISSING_FIELDS");
        let message = res.body["message"].as_str().unwrap();
        for field in ["subject", "full", "pass", "obtain"] {
            assert!(message.contains(field), "missing '{field}' in: {message}");
        }
    }

    #[tokio::test]
    async fn rejects_nonpositive_full_marks() {
        let app = TestApp::spawn().await;

        let res = app
            .post(
                routes::STUDENTS,
                &json!({
                    "roll": 5,
                    "name": "Zero Full",
                    "subject": "Biology",
                    "full": 0,
                    "pass": 0,
                    "obtain": 0
                }),
            )
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "FULL_MARKS_INVALID");
    }

    #[tokio::test]
    async fn rejects_negative_obtained_marks() {
        let app = TestApp::spawn().await;

        let res = app
            .post(
                routes::STUDENTS,
                &json!({
                    "roll": 6,
                    "name": "Negative Obtain",
                    "subject": "Biology",
                    "full": 100,
                    "pass": 40,
                    "obtain": -1
                }),
            )
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "OBTAINED_NEGATIVE");
    }

    #[tokio::test]
    async fn rejects_obtained_above_full() {
        let app = TestApp::spawn().await;

        let res = app
            .post(
                routes::STUDENTS,
                &json!({
                    "roll": 7,
                    "name": "Too Many Marks",
                    "subject": "Biology",
                    "full": 100,
                    "pass": 40,
                    "obtain": 101
                }),
            )
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "OBTAINED_EXCEEDS_FULL");
    }

    #[tokio::test]
    async fn full_marks_rule_is_reported_first() {
        let app = TestApp::spawn().await;

        let res = app
            .post(
                routes::STUDENTS,
                &json!({
                    "roll": 8,
                    "name": "Everything Wrong",
                    "subject": "Biology",
                    "full": 0,
                    "pass": 40,
                    "obtain": -1
                }),
            )
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "FULL_MARKS_INVALID");
    }

    #[tokio::test]
    async fn pass_threshold_above_full_is_accepted_and_fails() {
        let app = TestApp::spawn().await;

        let body = app.create_student(9, 50.0, 60.0, 50.0).await;

        assert_eq!(body["percentage"], 100.0);
        assert_eq!(body["result"], "Fail");
    }

    #[tokio::test]
    async fn rejects_blank_name() {
        let app = TestApp::spawn().await;

        let res = app
            .post(
                routes::STUDENTS,
                &json!({
                    "roll": 10,
                    "name": "   ",
                    "subject": "History",
                    "full": 100,
                    "pass": 40,
                    "obtain": 50
                }),
            )
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn duplicate_roll_conflicts_and_keeps_one_record() {
        let app = TestApp::spawn().await;
        app.create_student(11, 100.0, 40.0, 75.0).await;

        let res = app
            .post(
                routes::STUDENTS,
                &json!({
                    "roll": 11,
                    "name": "Second Entry",
                    "subject": "Geography",
                    "full": 100,
                    "pass": 40,
                    "obtain": 80
                }),
            )
            .await;

        assert_eq!(res.status, 409);
        assert_eq!(res.body["code"], "DUPLICATE_ROLL");

        let list = app.get(routes::STUDENTS).await;
        assert_eq!(list.status, 200);
        assert_eq!(list.body["count"], 1);

        // Exactly one row for the roll at the store level, and it is the first one.
        let rows = count_rows_for_roll(&app, 11).await;
        assert_eq!(rows, 1);
        assert_eq!(list.body["data"][0]["obtain"], 75.0);
    }

    async fn count_rows_for_roll(app: &TestApp, roll: i64) -> u64 {
        use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter};
        use server::entity::student;

        student::Entity::find()
            .filter(student::Column::Roll.eq(roll))
            .count(&app.db)
            .await
            .expect("count rows")
    }
}

mod retrieval {
    use super::*;

    #[tokio::test]
    async fn gets_a_record_by_roll() {
        let app = TestApp::spawn().await;
        app.create_student(21, 100.0, 40.0, 75.0).await;

        let res = app.get(&routes::student(21)).await;

        assert_eq!(res.status, 200);
        assert_eq!(res.body["roll"], 21);
        assert_eq!(res.body["result"], "Pass");
    }

    #[tokio::test]
    async fn unknown_roll_is_not_found() {
        let app = TestApp::spawn().await;

        let res = app.get(&routes::student(404)).await;

        assert_eq!(res.status, 404);
        assert_eq!(res.body["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn list_is_ordered_by_ascending_roll() {
        let app = TestApp::spawn().await;
        app.create_student(33, 100.0, 40.0, 70.0).await;
        app.create_student(31, 100.0, 40.0, 50.0).await;
        app.create_student(32, 100.0, 40.0, 60.0).await;

        let res = app.get(routes::STUDENTS).await;

        assert_eq!(res.status, 200);
        assert_eq!(res.body["count"], 3);
        let rolls: Vec<i64> = res.body["data"]
            .as_array()
            .unwrap()
            .iter()
            .map(|r| r["roll"].as_i64().unwrap())
            .collect();
        assert_eq!(rolls, vec![31, 32, 33]);
    }

    #[tokio::test]
    async fn empty_store_lists_zero_records() {
        let app = TestApp::spawn().await;

        let res = app.get(routes::STUDENTS).await;

        assert_eq!(res.status, 200);
        assert_eq!(res.body["count"], 0);
        assert_eq!(res.body["data"].as_array().unwrap().len(), 0);
    }
}

mod update {
    use super::*;

    #[tokio::test]
    async fn obtain_only_update_rederives_against_stored_marks() {
        let app = TestApp::spawn().await;
        app.create_student(41, 100.0, 40.0, 75.0).await;

        let res = app.patch(&routes::student(41), &json!({"obtain": 10})).await;

        assert_eq!(res.status, 200, "Update failed: {}", res.text);
        assert_eq!(res.body["obtain"], 10.0);
        assert_eq!(res.body["percentage"], 10.0);
        assert_eq!(res.body["result"], "Fail");
        // Untouched marks keep their stored values.
        assert_eq!(res.body["full"], 100.0);
        assert_eq!(res.body["pass"], 40.0);
    }

    #[tokio::test]
    async fn update_is_idempotent() {
        let app = TestApp::spawn().await;
        app.create_student(42, 100.0, 40.0, 75.0).await;

        let payload = json!({"obtain": 55, "subject": "Algebra"});
        let first = app.patch(&routes::student(42), &payload).await;
        let second = app.patch(&routes::student(42), &payload).await;

        assert_eq!(first.status, 200);
        assert_eq!(second.status, 200);
        for field in ["roll", "name", "subject", "full", "pass", "obtain", "percentage", "result"] {
            assert_eq!(first.body[field], second.body[field], "field '{field}' changed");
        }
    }

    #[tokio::test]
    async fn empty_payload_returns_record_unchanged() {
        let app = TestApp::spawn().await;
        let created = app.create_student(43, 100.0, 40.0, 75.0).await;

        let res = app.patch(&routes::student(43), &json!({})).await;

        assert_eq!(res.status, 200);
        assert_eq!(res.body, created);
    }

    #[tokio::test]
    async fn roll_number_cannot_be_changed() {
        let app = TestApp::spawn().await;
        app.create_student(44, 100.0, 40.0, 75.0).await;

        let res = app.patch(&routes::student(44), &json!({"roll": 45})).await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");

        // The stored record is untouched.
        let unchanged = app.get(&routes::student(44)).await;
        assert_eq!(unchanged.status, 200);
        assert_eq!(app.get(&routes::student(45)).await.status, 404);
    }

    #[tokio::test]
    async fn shrinking_full_below_stored_obtain_is_rejected() {
        let app = TestApp::spawn().await;
        app.create_student(46, 100.0, 40.0, 75.0).await;

        let res = app.patch(&routes::student(46), &json!({"full": 50})).await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "OBTAINED_EXCEEDS_FULL");

        // Failed validation leaves the stored record intact.
        let unchanged = app.get(&routes::student(46)).await;
        assert_eq!(unchanged.body["full"], 100.0);
        assert_eq!(unchanged.body["percentage"], 75.0);
    }

    #[tokio::test]
    async fn raising_full_rederives_percentage_and_result() {
        let app = TestApp::spawn().await;
        app.create_student(47, 100.0, 40.0, 75.0).await;

        let res = app
            .patch(&routes::student(47), &json!({"full": 200, "pass": 100}))
            .await;

        assert_eq!(res.status, 200);
        assert_eq!(res.body["percentage"], 37.5);
        assert_eq!(res.body["result"], "Fail");
        assert_eq!(res.body["obtain"], 75.0);
    }

    #[tokio::test]
    async fn nonpositive_full_in_update_is_rejected() {
        let app = TestApp::spawn().await;
        app.create_student(48, 100.0, 40.0, 75.0).await;

        let res = app.patch(&routes::student(48), &json!({"full": 0})).await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "FULL_MARKS_INVALID");
    }

    #[tokio::test]
    async fn text_fields_update_without_touching_marks() {
        let app = TestApp::spawn().await;
        let created = app.create_student(49, 100.0, 40.0, 75.0).await;

        let res = app
            .patch(
                &routes::student(49),
                &json!({"name": "  Renamed Student  ", "subject": "Statistics"}),
            )
            .await;

        assert_eq!(res.status, 200);
        assert_eq!(res.body["name"], "Renamed Student");
        assert_eq!(res.body["subject"], "Statistics");
        assert_eq!(res.body["percentage"], created["percentage"]);
        assert_eq!(res.body["result"], created["result"]);
    }

    #[tokio::test]
    async fn updating_an_unknown_roll_is_not_found() {
        let app = TestApp::spawn().await;

        let res = app.patch(&routes::student(404), &json!({"obtain": 1})).await;

        assert_eq!(res.status, 404);
        assert_eq!(res.body["code"], "NOT_FOUND");
    }
}

mod deletion {
    use super::*;

    #[tokio::test]
    async fn delete_returns_the_record_and_removes_it() {
        let app = TestApp::spawn().await;
        app.create_student(51, 100.0, 40.0, 75.0).await;

        let res = app.delete(&routes::student(51)).await;

        assert_eq!(res.status, 200);
        assert_eq!(res.body["roll"], 51);
        assert_eq!(res.body["result"], "Pass");

        assert_eq!(app.get(&routes::student(51)).await.status, 404);
    }

    #[tokio::test]
    async fn deleted_roll_can_be_reused() {
        let app = TestApp::spawn().await;
        app.create_student(52, 100.0, 40.0, 75.0).await;
        app.delete(&routes::student(52)).await;

        let body = app.create_student(52, 80.0, 30.0, 20.0).await;
        assert_eq!(body["result"], "Fail");
    }

    #[tokio::test]
    async fn deleting_a_nonexistent_roll_leaves_store_unchanged() {
        let app = TestApp::spawn().await;
        app.create_student(53, 100.0, 40.0, 75.0).await;

        let res = app.delete(&routes::student(9999)).await;

        assert_eq!(res.status, 404);
        assert_eq!(res.body["code"], "NOT_FOUND");

        let list = app.get(routes::STUDENTS).await;
        assert_eq!(list.body["count"], 1);
    }
}
