//! Relative validation of clustering stability.
//!
//! A classifier `f` is trained to imitate a clustering `A` on training
//! data `X`, then asked to reproduce a fresh clustering of held-out data
//! `X'`:
//!
//! ```text
//! train error = L( A(X),  f(X)  )
//! test error  = L( A(X'), π f(X') ),   π = optimal relabeling
//! ```
//!
//! Both errors are compared with the same protocol run on randomly
//! permuted labels, where no real structure can be learned.

use crate::common::*;
use crate::traits::*;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::Serialize;

pub struct RelativeValidator<S, C> {
    class_method: S,
    clust_method: C,
    nrand: usize,
    rseed: u64,
}

/// Result of [`RelativeValidator::train`]
pub struct TrainOutcome<M> {
    pub misclass: f64,
    pub model: M,
    /// clustering labels `A(X)`
    pub labels: Vec<usize>,
}

/// Result of [`RelativeValidator::test`]
#[derive(Debug, Clone)]
pub struct TestOutcome {
    pub misclass: f64,
    /// clustering labels `A(X')`
    pub labels: Vec<usize>,
}

/// Mean errors of the random-label baseline
#[derive(Debug, Clone, Copy, Serialize)]
pub struct RandomLabelOutcome {
    pub train_misclass: f64,
    pub test_misclass: f64,
}

/// Train, test and the random baseline in one record
#[derive(Debug, Clone, Serialize)]
pub struct ValidationOutcome {
    pub train_misclass: f64,
    pub test_misclass: f64,
    pub rnd_train_misclass: f64,
    pub rnd_test_misclass: f64,
    /// test error relative to the random baseline (smaller = more stable)
    pub normalized_stability: f64,
    #[serde(skip)]
    pub train_labels: Vec<usize>,
    #[serde(skip)]
    pub test_labels: Vec<usize>,
}

impl<S, C> RelativeValidator<S, C>
where
    S: ClassificationMethod + Sync,
    C: ClusteringMethod,
{
    /// * `class_method` - supervised method imitating the clustering
    /// * `clust_method` - clustering whose stability is assessed
    /// * `nrand` - number of random-label rounds
    /// * `rseed` - seed of the random-label permutations
    pub fn new(class_method: S, clust_method: C, nrand: usize, rseed: u64) -> Self {
        Self {
            class_method,
            clust_method,
            nrand,
            rseed,
        }
    }

    /// Cluster the training data and teach the classifier to imitate it
    pub fn train(&self, train_data: &Mat) -> anyhow::Result<TrainOutcome<S::Model>> {
        let clust_lab = self.clust_method.fit_predict(train_data)?;
        check_labels(train_data, &clust_lab, self.clust_method.name())?;

        let model = self.class_method.fit(train_data, &clust_lab)?;
        let class_lab = model.predict(train_data)?;

        // same label space by construction, no relabeling
        let misclass = disagreement_rate(&clust_lab, &class_lab)?;

        info!(
            "train: {} samples, {} vs. {} misclassification {:.4}",
            train_data.nrows(),
            self.clust_method.name(),
            self.class_method.name(),
            misclass
        );

        Ok(TrainOutcome {
            misclass,
            model,
            labels: clust_lab,
        })
    }

    /// Re-cluster the test data and compare with the trained classifier
    /// after optimal relabeling
    pub fn test(&self, test_data: &Mat, model: &S::Model) -> anyhow::Result<TestOutcome> {
        let clust_lab = self.clust_method.fit_predict(test_data)?;
        check_labels(test_data, &clust_lab, self.clust_method.name())?;

        let class_lab = model.predict(test_data)?;
        let permuted = LabelMatcher::new().match_labels(&clust_lab, &class_lab)?;
        let misclass = disagreement_rate(&clust_lab, &permuted)?;

        info!(
            "test: {} samples, misclassification {:.4}",
            test_data.nrows(),
            misclass
        );

        Ok(TestOutcome {
            misclass,
            labels: clust_lab,
        })
    }

    /// Random-label baseline
    ///
    /// Each round permutes `train_labels`, fits the classifier on them and
    /// scores it on both sides. The permutations are drawn up front from a
    /// generator seeded with `rseed`; the rounds themselves run in
    /// parallel.
    pub fn rndlabels_traineval(
        &self,
        train_data: &Mat,
        test_data: &Mat,
        train_labels: &[usize],
        test_labels: &[usize],
    ) -> anyhow::Result<RandomLabelOutcome> {
        if self.nrand == 0 {
            anyhow::bail!("need at least one random-label round");
        }
        check_labels(train_data, train_labels, "training")?;
        check_labels(test_data, test_labels, "test")?;

        let mut rng = StdRng::seed_from_u64(self.rseed);
        let shuffled: Vec<Vec<usize>> = (0..self.nrand)
            .map(|_| {
                let mut lab = train_labels.to_vec();
                lab.shuffle(&mut rng);
                lab
            })
            .collect();

        let matcher = LabelMatcher::new();
        let class_method = &self.class_method;

        let scores = shuffled
            .par_iter()
            .enumerate()
            .map(|(r, lab)| -> anyhow::Result<(f64, f64)> {
                let model = class_method.fit(train_data, lab)?;
                let tr = disagreement_rate(lab, &model.predict(train_data)?)?;
                let ts = matcher.aligned_disagreement(test_labels, &model.predict(test_data)?)?;
                debug!("random round {}: train {:.4}, test {:.4}", r, tr, ts);
                Ok((tr, ts))
            })
            .collect::<anyhow::Result<Vec<_>>>()?;

        let nn = scores.len() as f64;
        let ret = RandomLabelOutcome {
            train_misclass: scores.iter().map(|s| s.0).sum::<f64>() / nn,
            test_misclass: scores.iter().map(|s| s.1).sum::<f64>() / nn,
        };

        info!(
            "random labels ({} rounds): train {:.4}, test {:.4}",
            self.nrand, ret.train_misclass, ret.test_misclass
        );

        Ok(ret)
    }

    /// `train`, `test` and the random baseline on the test clustering
    pub fn validate(&self, train_data: &Mat, test_data: &Mat) -> anyhow::Result<ValidationOutcome> {
        let tr = self.train(train_data)?;
        let ts = self.test(test_data, &tr.model)?;
        let rnd = self.rndlabels_traineval(train_data, test_data, &tr.labels, &ts.labels)?;

        if rnd.test_misclass <= 0.0 {
            anyhow::bail!(
                "random-label test error is zero; stability cannot be normalized \
                 (does the clustering produce a single cluster?)"
            );
        }

        Ok(ValidationOutcome {
            train_misclass: tr.misclass,
            test_misclass: ts.misclass,
            rnd_train_misclass: rnd.train_misclass,
            rnd_test_misclass: rnd.test_misclass,
            normalized_stability: ts.misclass / rnd.test_misclass,
            train_labels: tr.labels,
            test_labels: ts.labels,
        })
    }
}

fn check_labels(data: &Mat, labels: &[usize], source: &str) -> anyhow::Result<()> {
    if data.nrows() == 0 {
        anyhow::bail!("empty {} data", source);
    }
    if data.nrows() != labels.len() {
        anyhow::bail!(
            "{} labels: expected {}, found {}",
            source,
            data.nrows(),
            labels.len()
        );
    }
    Ok(())
}
