//! The `synthscore init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    // Create synthscore.toml
    if std::path::Path::new("synthscore.toml").exists() {
        println!("synthscore.toml already exists, skipping.");
    } else {
        std::fs::write("synthscore.toml", SAMPLE_CONFIG)?;
        println!("Created synthscore.toml");
    }

    // Create sample result
    std::fs::create_dir_all("results")?;
    let sample_path = std::path::Path::new("results/sample.json");
    if sample_path.exists() {
        println!("results/sample.json already exists, skipping.");
    } else {
        std::fs::write(sample_path, SAMPLE_RESULT)?;
        println!("Created results/sample.json");
    }

    println!("\nNext steps:");
    println!("  1. Adjust page geometry and thresholds in synthscore.toml");
    println!("  2. Run: synthscore validate --input results/sample.json");
    println!("  3. Run: synthscore render --input results/sample.json --format all");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# synthscore configuration

output_dir = "./synthscore-reports"

# Page geometry in millimetres, measured from the top-left corner.
[layout]
page_width = 210.0
page_content_height = 297.0
margin = 15.0
column_width = 180.0
line_height = 5.0
char_width = 1.8

[style]
no_answer_placeholder = "No answer provided"

[thresholds]
fallback = "Remediation Notice Sent"

[[thresholds.levels]]
min_percentage = 50.0
label = "Appreciation Sent"
"#;

const SAMPLE_RESULT: &str = r#"{
  "studentName": "John Smith",
  "studentId": "STU-001",
  "parentEmail": "parent.smith@example.com",
  "totalScore": 3,
  "totalQuestions": 6,
  "percentage": 50,
  "communicationStatus": "Appreciation Sent (50.0%)",
  "questions": [
    {
      "id": 1,
      "status": "correct",
      "masterKey": "Objects that roll include balls and cylinders",
      "studentAnswer": "Ball",
      "logic": "Correct identification of rolling objects",
      "category": "Motion"
    },
    {
      "id": 2,
      "status": "incorrect",
      "masterKey": "Objects that slide include books and boxes",
      "studentAnswer": "Ball",
      "logic": "Student confused rolling with sliding. Balls roll, they do not slide.",
      "category": "Motion"
    },
    {
      "id": 3,
      "status": "correct",
      "masterKey": "2 + 4 = 6",
      "studentAnswer": "2 + 4 = 6",
      "logic": "Correct number combination",
      "category": "Arithmetic"
    },
    {
      "id": 4,
      "status": "incorrect",
      "masterKey": "3 + 3 = 6",
      "studentAnswer": "2 + 5 = 6",
      "logic": "While the sum is correct, the specific combination requested was 3 + 3",
      "category": "Arithmetic"
    },
    {
      "id": 5,
      "status": "incorrect",
      "masterKey": "Cube is a solid shape with 6 faces",
      "studentAnswer": "",
      "logic": "No answer was given. A cube is the correct answer.",
      "category": "Geometry"
    },
    {
      "id": 6,
      "status": "correct",
      "masterKey": "Sphere is a solid shape",
      "studentAnswer": "Sphere",
      "logic": "Correct identification of a 3D solid shape",
      "category": "Geometry"
    }
  ]
}
"#;
