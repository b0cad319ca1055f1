// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

/// Kubernetes annotation keys written by kube-hello
pub mod annotations {
    /// Records the command that last changed an object
    pub const CHANGE_CAUSE: &str = "kubernetes.io/change-cause";
}

/// Namespace used when neither the flags nor the kubeconfig name one
pub const DEFAULT_NAMESPACE: &str = "default";

/// File extensions picked up when a directory is passed with `-f`
pub const INPUT_EXTENSIONS: &[&str] = &["json", "yaml", "yml"];

/// In-cluster configuration locations
pub mod incluster {
    pub const SERVICE_HOST_ENV: &str = "KUBERNETES_SERVICE_HOST";
    pub const NAMESPACE_PATH: &str = "/var/run/secrets/kubernetes.io/serviceaccount/namespace";
}

/// Resource categories that expand into several resource types
pub mod categories {
    pub const ALL: &str = "all";

    /// Members of the `all` category, as `plural[.group]`
    pub const ALL_MEMBERS: &[&str] = &[
        "pods",
        "replicationcontrollers",
        "services",
        "daemonsets.apps",
        "deployments.apps",
        "replicasets.apps",
        "statefulsets.apps",
        "horizontalpodautoscalers.autoscaling",
        "cronjobs.batch",
        "jobs.batch",
    ];
}
