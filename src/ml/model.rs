use burn::{
    nn::{Dropout, DropoutConfig, Linear, LinearConfig},
    prelude::*,
    tensor::activation::relu,
};

#[derive(Config, Debug)]
pub struct MlpClassifierConfig {
    pub num_features: usize,
    pub hidden_size:  usize,
    pub num_classes:  usize,
    #[config(default = 0.0)]
    pub dropout:      f64,
}

impl MlpClassifierConfig {
    pub fn init<B: Backend>(&self, device: &B::Device) -> MlpClassifier<B> {
        MlpClassifier {
            hidden:  LinearConfig::new(self.num_features, self.hidden_size).init(device),
            output:  LinearConfig::new(self.hidden_size, self.num_classes).init(device),
            dropout: DropoutConfig::new(self.dropout).init(),
        }
    }
}

/// One hidden layer, ReLU, class logits.
#[derive(Module, Debug)]
pub struct MlpClassifier<B: Backend> {
    pub hidden:  Linear<B>,
    pub output:  Linear<B>,
    pub dropout: Dropout,
}

impl<B: Backend> MlpClassifier<B> {
    /// features: [batch, num_features] → logits: [batch, num_classes]
    pub fn forward(&self, features: Tensor<B, 2>) -> Tensor<B, 2> {
        let x = relu(self.hidden.forward(features));
        self.output.forward(self.dropout.forward(x))
    }
}
