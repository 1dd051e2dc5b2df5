//! Embedded starter templates and repo scaffolding
//!
//! `imprint add` drops these into a repo's template namespace as a starting
//! point; they reference the keys of the starter config written by
//! `imprint init` / `imprint new`.

use std::path::{Path, PathBuf};

use crate::error::{CliError, Result};

/// Component names accepted by `imprint add` / `imprint remove`
pub const COMPONENTS: &[&str] = &[
    "deployment",
    "service",
    "configmap",
    "secret",
    "httproute",
    "hpa",
];

const DEPLOYMENT: &str = r#"apiVersion: apps/v1
kind: Deployment
metadata:
  name: {{ name }}
  labels:
    app: {{ name }}
spec:
  replicas: {{ replicas }}
  selector:
    matchLabels:
      app: {{ name }}
  template:
    metadata:
      labels:
        app: {{ name }}
    spec:
      containers:
        - name: {{ name }}
          image: {{ image }}
          ports:
            - containerPort: {{ port }}
          envFrom:
            - configMapRef:
                name: {{ name }}-config
            - secretRef:
                name: {{ name }}-secrets
"#;

const SERVICE: &str = r#"apiVersion: v1
kind: Service
metadata:
  name: {{ name }}
  labels:
    app: {{ name }}
spec:
  selector:
    app: {{ name }}
  ports:
    - port: {{ port }}
      targetPort: {{ port }}
"#;

const CONFIGMAP: &str = r#"apiVersion: v1
kind: ConfigMap
metadata:
  name: {{ name }}-config
data:
{% for key, value in config | items %}  {{ key }}: {{ value | quote }}
{% endfor %}"#;

const SECRET: &str = r#"apiVersion: v1
kind: Secret
metadata:
  name: {{ name }}-secrets
type: Opaque
data:
{% for key, value in secrets | items %}  {{ key }}: {{ value | b64encode }}
{% endfor %}"#;

const HTTPROUTE: &str = r#"apiVersion: gateway.networking.k8s.io/v1
kind: HTTPRoute
metadata:
  name: {{ name }}
spec:
  hostnames:
    - {{ host | quote }}
  rules:
    - backendRefs:
        - name: {{ name }}
          port: {{ port }}
"#;

const HPA: &str = r#"apiVersion: autoscaling/v2
kind: HorizontalPodAutoscaler
metadata:
  name: {{ name }}
spec:
  scaleTargetRef:
    apiVersion: apps/v1
    kind: Deployment
    name: {{ name }}
  minReplicas: {{ replicas }}
  maxReplicas: {{ replicas * 2 }}
  metrics:
    - type: Resource
      resource:
        name: cpu
        target:
          type: Utilization
          averageUtilization: 80
"#;

/// Starter config dropped into every new repo
pub const STARTER_CONFIG: &str = r#"{
  "name": "my-app",
  "image": "nginx:1.27",
  "replicas": 2,
  "port": 8080,
  "host": "my-app.example.com",
  "config": {
    "LOG_LEVEL": "info"
  },
  "secrets": {
    "API_KEY": "changeme"
  }
}
"#;

/// Look up the starter template for a component name
pub fn starter(component: &str) -> Option<&'static str> {
    match component {
        "deployment" => Some(DEPLOYMENT),
        "service" => Some(SERVICE),
        "configmap" => Some(CONFIGMAP),
        "secret" => Some(SECRET),
        "httproute" => Some(HTTPROUTE),
        "hpa" => Some(HPA),
        _ => None,
    }
}

/// Create `<root>/<name>` with its templates/ and manifests/ directories and
/// a starter config
pub fn create_repo(root: &Path, name: &str) -> Result<PathBuf> {
    let repo = root.join(name);
    if repo.exists() {
        return Err(CliError::usage(format!(
            "repo '{name}' already exists in this project"
        )));
    }
    std::fs::create_dir_all(repo.join("templates"))?;
    std::fs::create_dir_all(repo.join("manifests"))?;
    std::fs::write(repo.join("config.json"), STARTER_CONFIG)?;
    Ok(repo)
}
