//! The fixed project content rendered into the report.
//!
//! Everything here is hardcoded prose and metadata for the S3/CloudFront
//! deployment project; only the screenshot base directory, the repository
//! name and the date are resolved at runtime.

use std::path::Path;

use chrono::Local;

use crate::config::repo_basename;
use crate::screenshots::ScreenshotRef;

/// Project metadata shown in the cover table and the PDF metadata.
#[derive(Clone, Debug, PartialEq)]
pub struct ProjectInfo {
    pub title: String,
    pub subtitle: String,
    pub author: String,
    pub repository: String,
    pub date: String,
    pub live_url: String,
    pub stack: String,
}

/// One deliverable row: a description plus a display status label.
#[derive(Clone, Debug, PartialEq)]
pub struct Deliverable {
    pub description: String,
    pub status: String,
}

impl Deliverable {
    fn new(description: &str, status: &str) -> Self {
        Self {
            description: description.to_owned(),
            status: status.to_owned(),
        }
    }
}

/// One success metric row in the conclusion table.
#[derive(Clone, Debug, PartialEq)]
pub struct Metric {
    pub name: String,
    pub value: String,
    pub notes: String,
}

impl Metric {
    fn new(name: &str, value: &str, notes: &str) -> Self {
        Self {
            name: name.to_owned(),
            value: value.to_owned(),
            notes: notes.to_owned(),
        }
    }
}

/// The complete fixed content consumed by the assembler.
#[derive(Clone, Debug, PartialEq)]
pub struct ReportContent {
    pub project: ProjectInfo,
    pub task_description: String,
    pub summary: String,
    pub deliverables: Vec<Deliverable>,
    pub implementation_points: Vec<String>,
    pub screenshots: Vec<ScreenshotRef>,
    pub conclusion: String,
    pub metrics: Vec<Metric>,
    pub technical_summary: String,
}

impl ReportContent {
    /// Builds the standard report content with screenshots resolved under
    /// `screenshots_dir`.
    pub fn standard(screenshots_dir: &Path) -> Self {
        let screenshots = [
            (
                "s3-settings.png",
                "S3 bucket configuration and static website settings.",
            ),
            (
                "bucket-policy.png",
                "Bucket policy allowing least-privilege access for website content.",
            ),
            (
                "cloudfront-distribution.png",
                "CloudFront distribution settings with OAC and default behavior.",
            ),
            (
                "website-live.png",
                "Live website served via CloudFront global edge locations.",
            ),
            (
                "week_8.png",
                "Deployment summary overview of resources and outcomes.",
            ),
        ]
        .into_iter()
        .map(|(file, caption)| ScreenshotRef::new(screenshots_dir.join(file), caption))
        .collect();

        Self {
            project: ProjectInfo {
                title: "Static Website Deployment with AWS S3 and CloudFront".to_owned(),
                subtitle: "Infrastructure-as-Code with Terraform for a globally distributed \
                           static portfolio site"
                    .to_owned(),
                author: "thaboxan".to_owned(),
                repository: repo_basename(),
                date: Local::now().format("%B %d, %Y").to_string(),
                live_url: "https://dbnp3womfvfzi.cloudfront.net".to_owned(),
                stack: "AWS S3, AWS CloudFront, Terraform, HTML/CSS, AWS CLI".to_owned(),
            },
            task_description: "Deploy a production-ready static website on AWS using S3 for \
                               website hosting and CloudFront for global content delivery. \
                               Automate infrastructure with Terraform, enable secure access via \
                               Origin Access Control, and publish the built site assets. Provide \
                               documentation, cost-conscious configuration, and verification \
                               screenshots."
                .to_owned(),
            summary: "This engagement delivers a robust, cost-effective static website platform \
                      on AWS. The site is hosted in Amazon S3 and distributed globally via \
                      Amazon CloudFront. Terraform codifies the infrastructure for consistency \
                      and repeatability. Security follows best practices with CloudFront as the \
                      single entry point and S3 protected by Origin Access Control."
                .to_owned(),
            deliverables: vec![
                Deliverable::new(
                    "Terraform IaC for S3 + CloudFront (OAC, default root object, HTTPS)",
                    "Done",
                ),
                Deliverable::new("S3 bucket static website configuration and policy", "Done"),
                Deliverable::new("Build and publish site artifacts (index.html, assets)", "Done"),
                Deliverable::new("Verification screenshots (S3, CloudFront, Live)", "Done"),
                Deliverable::new("Documentation (README, PDF report)", "Done"),
            ],
            implementation_points: vec![
                "Provisioned AWS resources via Terraform: S3 bucket with versioning, CloudFront \
                 distribution, and Origin Access Control."
                    .to_owned(),
                "Restricted bucket access to CloudFront using OAC; public website access flows \
                 exclusively through CloudFront."
                    .to_owned(),
                "Configured default root object (index.html) and optimized CloudFront behaviors \
                 for static assets."
                    .to_owned(),
                "Uploaded built website artifacts to S3; validated correct content-types for \
                 CSS/JS/images."
                    .to_owned(),
                "Performed deployment validation and recorded evidence screenshots.".to_owned(),
            ],
            screenshots,
            conclusion: "The solution meets all stated objectives: it is globally performant, \
                         secure by design, automated via Terraform, and documented. The platform \
                         is production-ready and positioned for low operational overhead and \
                         cost efficiency."
                .to_owned(),
            metrics: vec![
                Metric::new(
                    "Provisioning Time",
                    "~15 minutes",
                    "Includes CloudFront deployment propagation.",
                ),
                Metric::new("Availability", ">99.9%", "Backed by AWS service SLAs."),
                Metric::new(
                    "Security Posture",
                    "OAC-enabled",
                    "Direct S3 access restricted; HTTPS enforced.",
                ),
                Metric::new(
                    "Scalability",
                    "Global CDN",
                    "Auto-scales via CloudFront edge network.",
                ),
            ],
            technical_summary: "S3 provides durable object storage and static website hosting; \
                                CloudFront delivers content with low latency. Terraform codifies \
                                the infrastructure, enabling reproducible deployments and change \
                                control."
                .to_owned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_content_lists_five_screenshots_in_order() {
        let content = ReportContent::standard(Path::new("screenshots"));
        let files: Vec<_> = content
            .screenshots
            .iter()
            .map(|shot| shot.path().file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(
            files,
            [
                "s3-settings.png",
                "bucket-policy.png",
                "cloudfront-distribution.png",
                "website-live.png",
                "week_8.png",
            ]
        );
    }

    #[test]
    fn deliverables_are_all_complete() {
        let content = ReportContent::standard(Path::new("screenshots"));
        assert_eq!(content.deliverables.len(), 5);
        assert!(content.deliverables.iter().all(|d| d.status == "Done"));
    }
}
