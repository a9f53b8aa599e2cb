//! Hello World example generation.
//!
//! A content registry keyed by (module, language, framework). The backend
//! gets a `/hello` JSON endpoint with CORS enabled; frontends get a
//! component that fetches it, so a freshly generated project demonstrates
//! one working request across the stack.
//!
//! Files are only written when they do not already exist — the installer
//! may have produced its own entry points and we never clobber those.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use monostack_core::prelude::{ExtraGenerator, SelectionSet};
use monostack_core::domain::ModuleKind;

/// Generates Hello World examples for the selected modules.
///
/// Registered only when `--hello-world` is passed.
#[derive(Debug, Default)]
pub struct HelloWorldGenerator;

impl HelloWorldGenerator {
    pub fn new() -> Self {
        Self
    }
}

impl ExtraGenerator for HelloWorldGenerator {
    fn name(&self) -> &'static str {
        "hello-world"
    }

    fn generate(&self, root: &Path, selections: &SelectionSet) -> bool {
        let backend_framework = selections
            .module(ModuleKind::Backend)
            .map(|c| c.framework.clone())
            .unwrap_or_else(|| "backend".to_string());

        let mut all_ok = true;
        for (kind, choice) in selections.modules() {
            if !choice.is_complete() {
                continue;
            }

            let files = match kind {
                ModuleKind::Backend => backend_files(&choice.language, &choice.framework),
                _ => frontend_files(kind, &choice.language, &choice.framework, &backend_framework),
            };

            match files {
                Some(files) => {
                    let module_dir = root.join(kind.as_str());
                    if write_files(&module_dir, &files) {
                        info!(module = %kind, "Generated Hello World example");
                    } else {
                        all_ok = false;
                    }
                }
                None => {
                    warn!(
                        "Hello World generation not supported for {} {} with {}",
                        choice.language, kind, choice.framework
                    );
                    all_ok = false;
                }
            }
        }
        all_ok
    }
}

fn write_files(module_dir: &Path, files: &[(PathBuf, String)]) -> bool {
    for (relative, content) in files {
        let path = module_dir.join(relative);
        if path.exists() {
            continue;
        }
        let created = path
            .parent()
            .map(fs::create_dir_all)
            .transpose()
            .and_then(|_| fs::write(&path, content));
        if let Err(e) = created {
            warn!(path = %path.display(), error = %e, "Failed to write Hello World file");
            return false;
        }
    }
    true
}

// ── Backend templates ─────────────────────────────────────────────────────────

fn backend_files(language: &str, framework: &str) -> Option<Vec<(PathBuf, String)>> {
    match (language, framework) {
        ("python", "flask") => Some(vec![
            (PathBuf::from("app.py"), FLASK_APP.to_string()),
            (
                PathBuf::from("requirements.txt"),
                "flask\nflask-cors\n".to_string(),
            ),
        ]),
        ("javascript", "express") => Some(vec![
            (PathBuf::from("app.js"), EXPRESS_APP.to_string()),
            (
                PathBuf::from("package.json"),
                EXPRESS_PACKAGE_JSON.to_string(),
            ),
        ]),
        ("java", "spring-boot") => Some(vec![
            (
                PathBuf::from("src/main/java/com/example/controllers/HelloWorldController.java"),
                SPRING_CONTROLLER.to_string(),
            ),
            (
                PathBuf::from("HELLO_WORLD_README.md"),
                SPRING_README.to_string(),
            ),
        ]),
        _ => None,
    }
}

const FLASK_APP: &str = r#"from flask import Flask, jsonify
from flask_cors import CORS

app = Flask(__name__)
CORS(app)  # Enable CORS for all routes

@app.route('/hello', methods=['GET'])
def hello_world():
    return jsonify({"message": "Hello, World!"})

if __name__ == '__main__':
    app.run(debug=True)
"#;

const EXPRESS_APP: &str = r#"const express = require('express');
const cors = require('cors');
const app = express();
const port = 3000;

app.use(cors());
app.use(express.json());

app.get('/hello', (req, res) => {
  res.json({ message: 'Hello, World!' });
});

app.listen(port, () => {
  console.log(`Server listening at http://localhost:${port}`);
});
"#;

const EXPRESS_PACKAGE_JSON: &str = r#"{
  "name": "express-hello-world",
  "version": "1.0.0",
  "description": "Express Hello World API",
  "main": "app.js",
  "scripts": {
    "start": "node app.js"
  },
  "dependencies": {
    "express": "^4.17.1",
    "cors": "^2.8.5"
  }
}
"#;

const SPRING_CONTROLLER: &str = r#"package com.example.controllers;

import org.springframework.web.bind.annotation.GetMapping;
import org.springframework.web.bind.annotation.RestController;
import org.springframework.web.bind.annotation.CrossOrigin;
import java.util.HashMap;
import java.util.Map;

@RestController
@CrossOrigin(origins = "*")
public class HelloWorldController {

    @GetMapping("/hello")
    public Map<String, String> helloWorld() {
        Map<String, String> response = new HashMap<>();
        response.put("message", "Hello, World!");
        return response;
    }
}
"#;

const SPRING_README: &str = r#"# Spring Boot Hello World API

This project includes a simple Hello World REST API endpoint.

## Endpoint

- **URL**: `/hello`
- **Method**: `GET`
- **Response**: `{"message": "Hello, World!"}`

## Running the Application

1. Navigate to the backend directory
2. Run `mvn spring-boot:run`
3. Access the API at http://localhost:8080/hello
"#;

// ── Frontend templates ────────────────────────────────────────────────────────

fn frontend_files(
    kind: ModuleKind,
    language: &str,
    framework: &str,
    backend_framework: &str,
) -> Option<Vec<(PathBuf, String)>> {
    // Components mention the backend framework they talk to.
    let fill = |template: &str| template.replace("{backend_framework}", backend_framework);

    match (kind, language, framework) {
        (ModuleKind::FrontendWeb, "javascript", "react") => Some(vec![
            (
                PathBuf::from("src/components/HelloWorld.js"),
                fill(REACT_COMPONENT),
            ),
            (
                PathBuf::from("src/components/HelloWorld.css"),
                HELLO_CSS.to_string(),
            ),
        ]),
        (ModuleKind::FrontendWeb, "javascript", "vuejs") => Some(vec![(
            PathBuf::from("src/components/HelloWorld.vue"),
            fill(VUE_COMPONENT),
        )]),
        _ => None,
    }
}

const REACT_COMPONENT: &str = r#"import React, { useState, useEffect } from 'react';
import './HelloWorld.css';

function HelloWorld() {
  const [message, setMessage] = useState('Loading...');
  const [error, setError] = useState(null);

  useEffect(() => {
    fetch('http://localhost:3000/hello')
      .then(response => {
        if (!response.ok) {
          throw new Error(`HTTP error! Status: ${response.status}`);
        }
        return response.json();
      })
      .then(data => {
        setMessage(data.message);
      })
      .catch(error => {
        console.error('Error fetching hello world:', error);
        setError('Failed to fetch message from backend');
      });
  }, []);

  return (
    <div className="hello-world-container">
      <h1>Hello World Example</h1>
      {error ? (
        <div className="error-message">
          <p>{error}</p>
          <p>Make sure your {backend_framework} backend is running!</p>
        </div>
      ) : (
        <div className="message-container">
          <p>Message from {backend_framework} backend:</p>
          <div className="message">{message}</div>
        </div>
      )}
    </div>
  );
}

export default HelloWorld;
"#;

const HELLO_CSS: &str = r#".hello-world-container {
  max-width: 600px;
  margin: 0 auto;
  padding: 2rem;
  text-align: center;
  border-radius: 10px;
  background-color: #f5f5f5;
}

.message {
  font-size: 1.5rem;
  font-weight: bold;
  padding: 1rem;
  border-radius: 5px;
  background-color: #e6f7ff;
  color: #0050b3;
}

.error-message {
  color: #f5222d;
  padding: 1rem;
  border-radius: 5px;
  background-color: #fff2f0;
}
"#;

const VUE_COMPONENT: &str = r#"<template>
  <div class="hello-world-container">
    <h1>Hello World Example</h1>
    <div v-if="error" class="error-message">
      <p>{{ error }}</p>
      <p>Make sure your {backend_framework} backend is running!</p>
    </div>
    <div v-else class="message-container">
      <p>Message from {backend_framework} backend:</p>
      <div class="message">{{ message }}</div>
    </div>
  </div>
</template>

<script>
export default {
  name: 'HelloWorld',
  data() {
    return { message: 'Loading...', error: null };
  },
  mounted() {
    fetch('http://localhost:3000/hello')
      .then(r => {
        if (!r.ok) throw new Error(`HTTP error! Status: ${r.status}`);
        return r.json();
      })
      .then(data => { this.message = data.message; })
      .catch(() => { this.error = 'Failed to fetch message from backend'; });
  },
};
</script>
"#;

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use monostack_core::domain::ModuleChoice;

    fn selections() -> SelectionSet {
        SelectionSet::new()
            .with_module(ModuleKind::Backend, ModuleChoice::new("python", "flask"))
            .with_module(
                ModuleKind::FrontendWeb,
                ModuleChoice::new("javascript", "react"),
            )
    }

    #[test]
    fn writes_backend_and_frontend_examples() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("backend")).unwrap();
        fs::create_dir_all(dir.path().join("frontend-web")).unwrap();

        assert!(HelloWorldGenerator::new().generate(dir.path(), &selections()));

        let app = fs::read_to_string(dir.path().join("backend/app.py")).unwrap();
        assert!(app.contains("/hello"));
        assert!(app.contains("CORS"));

        let component =
            fs::read_to_string(dir.path().join("frontend-web/src/components/HelloWorld.js"))
                .unwrap();
        assert!(component.contains("http://localhost:3000/hello"));
        assert!(component.contains("flask backend"));
    }

    #[test]
    fn existing_files_are_not_overwritten() {
        let dir = tempfile::tempdir().unwrap();
        let backend = dir.path().join("backend");
        fs::create_dir_all(&backend).unwrap();
        fs::write(backend.join("app.py"), "# my own app\n").unwrap();

        let selections = SelectionSet::new()
            .with_module(ModuleKind::Backend, ModuleChoice::new("python", "flask"));
        assert!(HelloWorldGenerator::new().generate(dir.path(), &selections));

        assert_eq!(
            fs::read_to_string(backend.join("app.py")).unwrap(),
            "# my own app\n"
        );
        // The companion file is still created.
        assert!(backend.join("requirements.txt").exists());
    }

    #[test]
    fn unsupported_combo_reports_failure() {
        let dir = tempfile::tempdir().unwrap();
        let selections = SelectionSet::new()
            .with_module(ModuleKind::Backend, ModuleChoice::new("haskell", "servant"));
        assert!(!HelloWorldGenerator::new().generate(dir.path(), &selections));
    }

    #[test]
    fn database_only_selection_is_trivially_ok() {
        let dir = tempfile::tempdir().unwrap();
        let selections = SelectionSet::new().with_database("postgres");
        assert!(HelloWorldGenerator::new().generate(dir.path(), &selections));
    }
}
