//! Built-in mapping for the `aws-icons` npm package (`node_modules/aws-icons/icons`).

/// Directory holding the service-level architecture icons.
pub const ARCHITECTURE_SERVICE_DIR: &str = "architecture-service";

/// Short names that failed to resolve in earlier package releases; the compiler prints
/// filename candidates for them to help fix the table.
pub const PROBLEMATIC_NAMES: &[&str] = &[
    "ecs",
    "eks",
    "outposts",
    "s3",
    "glacier",
    "ebs",
    "qldb",
    "vpc",
    "iam",
    "kms",
    "sso",
    "sqs",
    "sns",
    "ses",
    "opensearch",
    "msk",
    "firehose",
    "ecr",
];

/// `(short name, file name)` pairs inside [`ARCHITECTURE_SERVICE_DIR`].
pub(crate) const AWS_ICONS: &[(&str, &str)] = &[
    // Compute
    ("ec2", "AmazonElasticContainerRegistry.svg"),
    ("lambda", "AWSLambda.svg"),
    ("ecs", "AmazonElasticContainerService.svg"),
    ("eks", "AmazonElasticKubernetesService.svg"),
    ("fargate", "AWSFargate.svg"),
    ("elastic_beanstalk", "AWSElasticBeanstalk.svg"),
    ("batch", "AWSBatch.svg"),
    ("lightsail", "AmazonLightsail.svg"),
    ("app_runner", "AWSAppRunner.svg"),
    ("outposts", "AWSOutpostsservers.svg"),
    // Storage
    ("s3", "AmazonSimpleStorageService.svg"),
    ("efs", "AmazonEFS.svg"),
    ("fsx", "AmazonFSx.svg"),
    ("glacier", "AmazonSimpleStorageServiceGlacier.svg"),
    ("ebs", "AWSElasticBeanstalk.svg"),
    ("storage_gateway", "AWSStorageGateway.svg"),
    ("backup", "AWSBackup.svg"),
    // Database
    ("rds", "AmazonRDS.svg"),
    ("dynamodb", "AmazonDynamoDB.svg"),
    ("aurora", "AmazonAurora.svg"),
    ("elasticache", "AmazonElastiCache.svg"),
    ("redshift", "AmazonRedshift.svg"),
    ("neptune", "AmazonNeptune.svg"),
    ("documentdb", "AmazonDocumentDB.svg"),
    ("keyspaces", "AmazonKeyspaces.svg"),
    ("timestream", "AmazonTimestream.svg"),
    ("qldb", "AmazonQuantumLedgerDatabase.svg"),
    ("memorydb", "AmazonMemoryDB.svg"),
    // Networking
    ("vpc", "AmazonVirtualPrivateCloud.svg"),
    ("cloudfront", "AmazonCloudFront.svg"),
    ("route53", "AmazonRoute53.svg"),
    ("api_gateway", "AmazonAPIGateway.svg"),
    ("elb", "ElasticLoadBalancing.svg"),
    ("transit_gateway", "AWSTransitGateway.svg"),
    ("direct_connect", "AWSDirectConnect.svg"),
    ("vpn", "AWSClientVPN.svg"),
    ("global_accelerator", "AWSGlobalAccelerator.svg"),
    ("privatelink", "AWSPrivateLink.svg"),
    ("app_mesh", "AWSAppMesh.svg"),
    ("cloud_map", "AWSCloudMap.svg"),
    // Security
    ("iam", "AWSIdentityandAccessManagement.svg"),
    ("cognito", "AmazonCognito.svg"),
    ("kms", "AWSKeyManagementService.svg"),
    ("secrets_manager", "AWSSecretsManager.svg"),
    ("waf", "AWSWAF.svg"),
    ("shield", "AWSShield.svg"),
    ("guardduty", "AmazonGuardDuty.svg"),
    ("inspector", "AmazonInspector.svg"),
    ("macie", "AmazonMacie.svg"),
    ("security_hub", "AWSSecurityHub.svg"),
    ("acm", "AWSCertificateManager.svg"),
    ("iam_identity_center", "AWSIAMIdentityCenter.svg"),
    ("detective", "AmazonDetective.svg"),
    ("network_firewall", "AWSNetworkFirewall.svg"),
    // Messaging
    ("sqs", "AmazonSimpleQueueService.svg"),
    ("sns", "AmazonSimpleNotificationService.svg"),
    ("eventbridge", "AmazonEventBridge.svg"),
    ("mq", "AmazonMQ.svg"),
    ("kinesis", "AmazonKinesis.svg"),
    ("step_functions", "AWSStepFunctions.svg"),
    ("appsync", "AWSAppSync.svg"),
    ("ses", "AmazonSimpleEmailService.svg"),
    ("pinpoint", "AmazonPinpoint.svg"),
    // Analytics
    ("athena", "AmazonAthena.svg"),
    ("emr", "AmazonEMR.svg"),
    ("glue", "AWSGlue.svg"),
    ("quicksight", "AmazonQuickSight.svg"),
    ("opensearch", "AmazonOpenSearchService.svg"),
    ("lake_formation", "AWSLakeFormation.svg"),
    ("msk", "AmazonManagedStreamingforApacheKafka.svg"),
    ("firehose", "AmazonDataFirehose.svg"),
    ("data_exchange", "AWSDataExchange.svg"),
    // ML / AI
    ("sagemaker", "AmazonSageMaker.svg"),
    ("bedrock", "AmazonBedrock.svg"),
    ("rekognition", "AmazonRekognition.svg"),
    ("textract", "AmazonTextract.svg"),
    ("comprehend", "AmazonComprehend.svg"),
    ("lex", "AmazonLex.svg"),
    ("polly", "AmazonPolly.svg"),
    ("translate", "AmazonTranslate.svg"),
    ("transcribe", "AmazonTranscribe.svg"),
    ("forecast", "AmazonForecast.svg"),
    ("personalize", "AmazonPersonalize.svg"),
    ("kendra", "AmazonKendra.svg"),
    ("q", "AmazonQ.svg"),
    // DevOps
    ("cloudwatch", "AmazonCloudWatch.svg"),
    ("cloudtrail", "AWSCloudTrail.svg"),
    ("cloudformation", "AWSCloudFormation.svg"),
    ("codepipeline", "AWSCodePipeline.svg"),
    ("codebuild", "AWSCodeBuild.svg"),
    ("codecommit", "AWSCodeCommit.svg"),
    ("codedeploy", "AWSCodeDeploy.svg"),
    ("systems_manager", "AWSSystemsManager.svg"),
    ("config", "AWSConfig.svg"),
    ("organizations", "AWSOrganizations.svg"),
    ("cdk", "AWSCloudDevelopmentKit.svg"),
    ("xray", "AWSXRay.svg"),
    ("trusted_advisor", "AWSTrustedAdvisor.svg"),
    ("cost_explorer", "AWSCostExplorer.svg"),
    ("control_tower", "AWSControlTower.svg"),
    // Containers
    ("ecr", "AmazonElasticContainerRegistry.svg"),
    // IoT
    ("iot_core", "AWSIoTCore.svg"),
    ("iot_greengrass", "AWSIoTGreengrass.svg"),
];
