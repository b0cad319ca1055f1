// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::{tempdir, TempDir};

const POD: &str = r#"
apiVersion: v1
kind: Pod
metadata:
  name: web
  namespace: team-a
  labels:
    app: hello
"#;

const SERVICE: &str = r#"
apiVersion: v1
kind: Service
metadata:
  name: frontend
  labels:
    app: other
"#;

/// The binary with an empty home and no cluster in sight
fn kube_hello(home: &Path) -> Command {
    let mut cmd = cargo_bin_cmd!("kube-hello");
    cmd.env("HOME", home)
        .env_remove("KUBECONFIG")
        .env_remove("KUBERNETES_SERVICE_HOST")
        .env_remove("RUST_LOG");
    cmd
}

fn manifest(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).unwrap();
    path
}

#[test]
fn hello_world_prints_greeting() {
    let home = tempdir().unwrap();

    kube_hello(home.path())
        .arg("hello-world")
        .assert()
        .success()
        .stdout("Hello World\n");
}

#[test]
fn hello_world_ignores_arguments() {
    let home = tempdir().unwrap();

    kube_hello(home.path())
        .args(["hello-world", "pods", "--all", "-x"])
        .assert()
        .success()
        .stdout("Hello World\n");
}

#[test]
fn hello_kubernetes_greets_local_definition() {
    let home = tempdir().unwrap();
    let pod = manifest(&home, "pod.yaml", POD);

    kube_hello(home.path())
        .args(["hello-kubernetes", "-n", "team-a", "-f"])
        .arg(&pod)
        .assert()
        .success()
        .stdout("Hello Pod web\n")
        .stderr(predicate::str::is_empty());
}

#[test]
fn hello_kubernetes_prints_creation_timestamp() {
    let home = tempdir().unwrap();
    let pod = manifest(
        &home,
        "pod.json",
        r#"{"apiVersion":"v1","kind":"Pod","metadata":{"name":"web","creationTimestamp":"2024-01-02T03:04:05Z"}}"#,
    );

    kube_hello(home.path())
        .args(["hello-kubernetes", "-f"])
        .arg(&pod)
        .assert()
        .success()
        .stdout("Hello Pod web 2024-01-02 03:04:05 +0000 UTC\n");
}

#[test]
fn hello_kubernetes_reads_directory_and_stdin() {
    let home = tempdir().unwrap();
    let manifests = tempdir().unwrap();
    manifest(&manifests, "a-service.yaml", SERVICE);
    manifest(&manifests, "notes.txt", "not a manifest");

    kube_hello(home.path())
        .args(["hello-kubernetes", "-f"])
        .arg(manifests.path())
        .args(["-f", "-"])
        .write_stdin("apiVersion: v1\nkind: ConfigMap\nmetadata:\n  name: settings\n")
        .assert()
        .success()
        .stdout("Hello Service frontend\nHello ConfigMap settings\n");
}

#[test]
fn hello_kubernetes_filters_by_selector() {
    let home = tempdir().unwrap();
    let objects = manifest(&home, "objects.yaml", &format!("{}---{}", POD, SERVICE));

    kube_hello(home.path())
        .args(["hello-kubernetes", "-l", "app=hello", "-f"])
        .arg(&objects)
        .assert()
        .success()
        .stdout("Hello Pod web\n");
}

#[test]
fn hello_kubernetes_fails_without_objects() {
    let home = tempdir().unwrap();
    let objects = manifest(&home, "objects.yaml", SERVICE);

    kube_hello(home.path())
        .args(["hello-kubernetes", "-l", "app=missing", "-f"])
        .arg(&objects)
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("no objects passed to kubernetes-hello"));
}

#[test]
fn hello_kubernetes_requires_resources() {
    let home = tempdir().unwrap();

    kube_hello(home.path())
        .arg("hello-kubernetes")
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "you must provide one or more resources by argument or filename",
        ));
}

#[test]
fn hello_kubernetes_reports_namespace_mismatch_and_keeps_going() {
    let home = tempdir().unwrap();
    let objects = manifest(&home, "objects.yaml", &format!("{}---{}", POD, SERVICE));

    kube_hello(home.path())
        .args(["hello-kubernetes", "-n", "team-b", "-f"])
        .arg(&objects)
        .assert()
        .failure()
        .stdout("Hello Service frontend\n")
        .stderr(predicate::str::contains(
            "does not match the namespace \"team-b\"",
        ));
}

#[test]
fn hello_kubernetes_prints_names() {
    let home = tempdir().unwrap();
    let objects = manifest(&home, "objects.yaml", &format!("{}---{}", POD, SERVICE));

    kube_hello(home.path())
        .args(["hello-kubernetes", "-o", "name", "-f"])
        .arg(&objects)
        .assert()
        .success()
        .stdout("pod/web\nservice/frontend\n");
}

#[test]
fn hello_kubernetes_rejects_unknown_output() {
    let home = tempdir().unwrap();
    let pod = manifest(&home, "pod.yaml", POD);

    kube_hello(home.path())
        .args(["hello-kubernetes", "-o", "wide", "-f"])
        .arg(&pod)
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "allowed formats are: json,name,yaml",
        ));
}

#[test]
fn hello_kubernetes_needs_cluster_for_arguments() {
    let home = tempdir().unwrap();

    kube_hello(home.path())
        .args(["hello-kubernetes", "pod/web"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unable to connect to the cluster"));
}

#[test]
fn help_describes_usage() {
    cargo_bin_cmd!("kube-hello")
        .arg("--help")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("hello-world")
                .and(predicate::str::contains("hello-kubernetes"))
                .and(predicate::str::contains("--kubeconfig <PATH>")),
        );
}

#[test]
fn version_flag_prints_version() {
    cargo_bin_cmd!("kube-hello")
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")))
        .stderr(predicate::str::is_empty());
}
